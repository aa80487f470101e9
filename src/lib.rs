use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod admit_card;
pub mod candidate;
pub mod config;
pub mod db;
pub mod settings;
pub mod state;
pub mod store;
pub mod validation;

pub use crate::state::AppState;

use crate::config::AppConfig;
use crate::store::StoreError;
use crate::validation::ValidationErrors;

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    /// Per-field messages, present on validation failures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            fields: None,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }

    pub fn render_error(message: &str) -> Self {
        Self::new("RenderError", message)
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        Self {
            fields: Some(errors.field_map()),
            ..Self::new("ValidationError", &errors.to_string())
        }
    }
}

/// Map a store failure to its HTTP response, logging server-side failures.
pub fn store_error_response(error: &StoreError) -> HttpResponse {
    match error {
        StoreError::NotFound(id) => HttpResponse::NotFound()
            .json(ErrorResponse::not_found(&format!("Candidate {} not found", id))),
        other => {
            log::error!("Store operation failed: {}", other);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&other.to_string()))
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::candidate::handlers::get_all_candidates,
        crate::candidate::handlers::create_candidate,
        crate::candidate::handlers::get_candidate_page,
        crate::candidate::handlers::search_candidates,
        crate::candidate::handlers::get_candidate_by_id,
        crate::candidate::handlers::update_candidate,
        crate::candidate::handlers::delete_candidate,
        crate::candidate::handlers::download_admit_card,
        crate::settings::routes::get_settings,
        crate::settings::routes::update_settings
    ),
    components(
        schemas(
            candidate::models::Candidate,
            candidate::models::NewCandidate,
            candidate::models::CandidateUpdate,
            candidate::models::CandidatePage,
            settings::model::Settings,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Candidates", description = "Candidate registration and admit-card endpoints."),
        (name = "Settings", description = "Form and token numbering.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Register every `/api` route on `cfg`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()));
                InternalError::from_response(err, response).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()));
                InternalError::from_response(err, response).into()
            }))
            .configure(candidate::handlers::config)
            .configure(settings::routes::config),
    );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::from_config(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialise the candidate store. Check STORE_BACKEND, DATA_FILE and DATABASE_URL in .env. Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("admit_card_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to create Prometheus metrics middleware: {}", e)))?;

    let allowed_origins = config.allowed_origins.clone();

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
