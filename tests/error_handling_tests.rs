use admit_card_server::validation::{ValidationError, ValidationErrors};
use admit_card_server::ErrorResponse;

#[test]
fn test_error_constructors() {
    assert_eq!(ErrorResponse::not_found("Candidate 4 not found").error, "NotFound");
    assert_eq!(ErrorResponse::bad_request("bad").error, "BadRequest");
    assert_eq!(ErrorResponse::internal_error("disk").error, "InternalServerError");
    assert_eq!(ErrorResponse::render_error("font").error, "RenderError");
}

#[test]
fn test_fields_omitted_unless_validation() {
    let json = serde_json::to_value(ErrorResponse::not_found("missing")).unwrap();
    assert!(json.get("fields").is_none());
    assert!(json["timestamp"].as_str().is_some());
}

#[test]
fn test_validation_response_lists_fields() {
    let mut errors = ValidationErrors::new();
    errors.add(ValidationError::empty_field("name", "Name"));
    errors.add(ValidationError::invalid_contact_no("contactNo"));

    let response = ErrorResponse::validation(&errors);
    assert_eq!(response.error, "ValidationError");

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["fields"]["name"].is_string());
    assert!(json["fields"]["contactNo"].is_string());
}
