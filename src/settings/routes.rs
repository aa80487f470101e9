use actix_web::{web, HttpResponse, Responder};

use crate::candidate::models::Candidate;
use crate::settings::model::Settings;
use crate::validation::Validate;
use crate::{store_error_response, AppState, ErrorResponse};

#[utoipa::path(
    context_path = "/api",
    tag = "Settings",
    get,
    path = "/settings",
    responses(
        (status = 200, description = "Counters used for the next registration", body = Settings)
    )
)]
pub async fn get_settings(state: web::Data<AppState>) -> impl Responder {
    match state.store.get_settings().await {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => store_error_response(&e),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Settings",
    put,
    path = "/settings",
    request_body = Settings,
    responses(
        (status = 200, description = "Settings replaced", body = Settings),
        (status = 400, description = "Counters must be positive", body = ErrorResponse)
    )
)]
pub async fn update_settings(
    state: web::Data<AppState>,
    item: web::Json<Settings>,
) -> impl Responder {
    let settings = item.into_inner();
    if let Err(errors) = settings.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::validation(&errors));
    }

    match state.store.list_all().await {
        Ok(candidates) => warn_on_reissue(&settings, &candidates),
        Err(e) => return store_error_response(&e),
    }

    match state.store.set_settings(settings).await {
        Ok(saved) => {
            log::info!(
                "Numbering settings updated: next form no {}, next token no {}",
                saved.next_form_number,
                saved.next_token_number
            );
            HttpResponse::Ok().json(saved)
        }
        Err(e) => store_error_response(&e),
    }
}

/// Highest numeric form and token numbers already handed out.
fn highest_issued(candidates: &[Candidate]) -> (Option<i64>, Option<i64>) {
    let form = candidates.iter().filter_map(|c| c.form_no.parse().ok()).max();
    let token = candidates.iter().filter_map(|c| c.token_no.parse().ok()).max();
    (form, token)
}

fn warn_on_reissue(settings: &Settings, candidates: &[Candidate]) {
    let (form, token) = highest_issued(candidates);
    if let Some(form) = form.filter(|f| settings.next_form_number <= *f) {
        log::warn!(
            "Next form number {} is not above the highest issued form number {}; numbers may repeat",
            settings.next_form_number,
            form
        );
    }
    if let Some(token) = token.filter(|t| settings.next_token_number <= *t) {
        log::warn!(
            "Next token number {} is not above the highest issued token number {}; numbers may repeat",
            settings.next_token_number,
            token
        );
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/settings")
            .route(web::get().to(get_settings))
            .route(web::put().to(update_settings)),
    );
}
