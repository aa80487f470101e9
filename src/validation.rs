//! Input validation with per-field error reporting.
//!
//! Rules are applied before anything reaches a store; the collected errors
//! are returned to the client keyed by JSON field name.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use crate::candidate::models::{Candidate, NewCandidate};
use crate::settings::model::Settings;

lazy_static! {
    static ref CONTACT_NO: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
}

/// Validation error for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }

    pub fn invalid_contact_no(field: &str) -> Self {
        Self::new(field, "Enter a valid 10-digit number")
    }

    pub fn not_positive(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must be a positive integer", label))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Field name to message; the first error wins when a field fails twice.
    pub fn field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }
        map
    }

    /// Ok if no errors were collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {} error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate a contact number of exactly ten ASCII digits
pub fn validate_contact_no(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Contact number"));
        return;
    }

    if !CONTACT_NO.is_match(trimmed) {
        errors.add(ValidationError::invalid_contact_no(field));
    }
}

pub fn validate_positive(value: i64, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value < 1 {
        errors.add(ValidationError::not_positive(field, label));
    }
}

fn validate_candidate_fields(
    name: &str,
    dob: &str,
    contact_no: &str,
    place: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    validate_required(name, "name", "Name", &mut errors);
    validate_required(dob, "dob", "Date of birth", &mut errors);
    validate_contact_no(contact_no, "contactNo", &mut errors);
    validate_required(place, "place", "Place", &mut errors);
    errors.into_result()
}

/// Trait for validating request objects.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for NewCandidate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_candidate_fields(&self.name, &self.dob, &self.contact_no, &self.place)
    }
}

impl Validate for Candidate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_candidate_fields(&self.name, &self.dob, &self.contact_no, &self.place)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_positive(
            self.next_form_number,
            "nextFormNumber",
            "Next form number",
            &mut errors,
        );
        validate_positive(
            self.next_token_number,
            "nextTokenNumber",
            "Next token number",
            &mut errors,
        );
        errors.into_result()
    }
}
