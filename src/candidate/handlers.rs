use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};

use crate::admit_card::{AdmitCardRenderer, PDF_CONTENT_TYPE};
use crate::candidate::models::{
    Candidate, CandidatePage, CandidateUpdate, NewCandidate, PageQuery, SearchQuery,
};
use crate::validation::Validate;
use crate::{store_error_response, AppState, ErrorResponse};

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    get,
    path = "/candidates",
    responses(
        (status = 200, description = "All candidates, newest first", body = [Candidate]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_all_candidates(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_all().await {
        Ok(candidates) => HttpResponse::Ok().json(candidates),
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    post,
    path = "/candidates",
    request_body = NewCandidate,
    responses(
        (status = 201, description = "Candidate registered with the next form and token numbers", body = Candidate),
        (status = 400, description = "Invalid candidate fields", body = ErrorResponse)
    )
)]
pub async fn create_candidate(
    state: web::Data<AppState>,
    item: web::Json<NewCandidate>,
) -> impl Responder {
    let new = item.into_inner().trimmed();
    if let Err(errors) = new.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation(&errors));
    }

    match state.store.create(new).await {
        Ok(candidate) => {
            log::info!(
                "Registered candidate {} ({}) with form no {} and token no {}",
                candidate.id,
                candidate.name,
                candidate.form_no,
                candidate.token_no
            );
            HttpResponse::Created().json(candidate)
        }
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    get,
    path = "/candidates/page",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of candidates, newest first", body = CandidatePage)
    )
)]
pub async fn get_candidate_page(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    match state.store.list_page(query.page(), query.page_size()).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    get,
    path = "/candidates/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Candidates whose name, form no, token no or place contain the query", body = [Candidate])
    )
)]
pub async fn search_candidates(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    match state.store.search(&query.q).await {
        Ok(candidates) => HttpResponse::Ok().json(candidates),
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    get,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = Candidate),
        (status = 404, description = "Candidate not found", body = ErrorResponse)
    )
)]
pub async fn get_candidate_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    match state.store.get_by_id(id).await {
        Ok(Some(candidate)) => HttpResponse::Ok().json(candidate),
        Ok(None) => not_found(id),
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    put,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body = CandidateUpdate,
    responses(
        (status = 200, description = "Candidate updated; form and token numbers unchanged", body = Candidate),
        (status = 400, description = "Invalid candidate fields", body = ErrorResponse),
        (status = 404, description = "Candidate not found", body = ErrorResponse)
    )
)]
pub async fn update_candidate(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    item: web::Json<CandidateUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    let mut candidate = match state.store.get_by_id(id).await {
        Ok(Some(c)) => c,
        Ok(None) => return not_found(id),
        Err(e) => return store_error_response(&e),
    };

    candidate.apply_update(&item);
    candidate.trim_fields();
    if let Err(errors) = candidate.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation(&errors));
    }

    match state.store.update(candidate).await {
        Ok(updated) => {
            log::info!("Updated candidate {}", updated.id);
            HttpResponse::Ok().json(updated)
        }
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    delete,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 404, description = "Candidate not found", body = ErrorResponse)
    )
)]
pub async fn delete_candidate(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match state.store.delete(id).await {
        Ok(true) => {
            log::info!("Deleted candidate {}", id);
            HttpResponse::NoContent().finish()
        }
        Ok(false) => not_found(id),
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Candidates",
    get,
    path = "/candidates/{id}/admit-card",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Admit card as a one-page A4 PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Candidate not found", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn download_admit_card(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    let candidate = match state.store.get_by_id(id).await {
        Ok(Some(c)) => c,
        Ok(None) => return not_found(id),
        Err(e) => return store_error_response(&e),
    };

    let rendered = web::block(move || AdmitCardRenderer::render(&candidate)).await;
    let document = match rendered {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            log::error!("Failed to render admit card for candidate {}: {}", id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::render_error(&e.to_string()));
        }
        Err(e) => {
            log::error!("Admit card rendering task for candidate {} failed: {}", id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::render_error(&e.to_string()));
        }
    };

    log::info!(
        "Generated admit card {} ({} bytes)",
        document.filename,
        document.pdf.len()
    );

    HttpResponse::Ok()
        .content_type(PDF_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.filename)],
        })
        .body(document.pdf)
}

fn not_found(id: i64) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found(&format!("Candidate {} not found", id)))
}

/// `/candidates/page` and `/candidates/search` are registered before
/// `/candidates/{id}` so they are not captured as ids.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/candidates")
            .route(web::get().to(get_all_candidates))
            .route(web::post().to(create_candidate)),
    )
    .service(web::resource("/candidates/page").route(web::get().to(get_candidate_page)))
    .service(web::resource("/candidates/search").route(web::get().to(search_candidates)))
    .service(
        web::resource("/candidates/{id}")
            .route(web::get().to(get_candidate_by_id))
            .route(web::put().to(update_candidate))
            .route(web::delete().to(delete_candidate)),
    )
    .service(
        web::resource("/candidates/{id}/admit-card").route(web::get().to(download_admit_card)),
    );
}
