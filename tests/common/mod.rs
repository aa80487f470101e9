#![allow(dead_code)]

use admit_card_server::candidate::models::NewCandidate;
use admit_card_server::settings::model::Settings;
use admit_card_server::store::{Dataset, MemoryStore};
use admit_card_server::AppState;
use std::sync::Arc;

/// State over an in-memory store holding `dataset`.
pub fn state_with(dataset: Dataset) -> AppState {
    AppState::new_with_store(Arc::new(MemoryStore::with_dataset(dataset)))
}

pub fn demo_state() -> AppState {
    state_with(Dataset::demo())
}

pub fn state_with_settings(settings: Settings) -> AppState {
    state_with(Dataset {
        settings,
        ..Dataset::default()
    })
}

/// Build a test service with every `/api` route over `state`.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(admit_card_server::configure_api),
        )
        .await
    };
}

pub fn new_candidate(name: &str) -> NewCandidate {
    NewCandidate {
        name: name.to_string(),
        dob: "12-3-2013".to_string(),
        contact_no: "9902700413".to_string(),
        place: "Puttur".to_string(),
        ..Default::default()
    }
}
