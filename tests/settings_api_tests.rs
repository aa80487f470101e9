#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use admit_card_server::candidate::models::Candidate;
use admit_card_server::settings::model::Settings;
use admit_card_server::ErrorResponse;
use serde_json::json;

use common::{demo_state, new_candidate};

#[actix_web::test]
async fn test_get_default_settings() {
    let app = init_app!(demo_state());

    let req = test::TestRequest::get().uri("/api/settings").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "nextFormNumber": 24261, "nextTokenNumber": 62 }));
}

#[actix_web::test]
async fn test_update_settings_applies_to_next_registration() {
    let app = init_app!(demo_state());

    let req = test::TestRequest::put()
        .uri("/api/settings")
        .set_json(json!({ "nextFormNumber": 30000, "nextTokenNumber": 500 }))
        .to_request();
    let saved: Settings = test::call_and_read_body_json(&app, req).await;
    assert_eq!(saved.next_form_number, 30000);

    let req = test::TestRequest::post()
        .uri("/api/candidates")
        .set_json(new_candidate("Ayaan Shetty"))
        .to_request();
    let created: Candidate = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created.form_no, "30000");
    assert_eq!(created.token_no, "500");
}

#[actix_web::test]
async fn test_lowering_counters_is_allowed() {
    let app = init_app!(demo_state());

    let req = test::TestRequest::put()
        .uri("/api/settings")
        .set_json(json!({ "nextFormNumber": 24258, "nextTokenNumber": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_settings_rejects_non_positive() {
    let app = init_app!(demo_state());

    let req = test::TestRequest::put()
        .uri("/api/settings")
        .set_json(json!({ "nextFormNumber": 0, "nextTokenNumber": -4 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    let fields = body.fields.unwrap();
    assert!(fields.contains_key("nextFormNumber"));
    assert!(fields.contains_key("nextTokenNumber"));

    let req = test::TestRequest::get().uri("/api/settings").to_request();
    let settings: Settings = test::call_and_read_body_json(&app, req).await;
    assert_eq!(settings, Settings::default());
}

#[actix_web::test]
async fn test_update_settings_rejects_missing_field() {
    let app = init_app!(demo_state());

    let req = test::TestRequest::put()
        .uri("/api/settings")
        .set_json(json!({ "nextFormNumber": 100 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
