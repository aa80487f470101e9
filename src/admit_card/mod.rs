//! Admit-card rendering.
//!
//! - `font_metrics` - Helvetica advance widths used for centering and wrapping
//! - `wrap` - greedy word wrapping
//! - `layout` - the fixed page layout as a list of draw operations
//! - `renderer` - paints the layout into PDF bytes with `printpdf`

pub mod font_metrics;
pub mod layout;
pub mod renderer;
pub mod wrap;

pub use renderer::AdmitCardRenderer;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Errors that abort admit-card rendering. No partial document is returned.
#[derive(Debug, Error)]
pub enum AdmitCardError {
    #[error("failed to register font: {0}")]
    Font(String),
    #[error("failed to serialize PDF: {0}")]
    Save(String),
    #[error("{field} contains {ch:?}, which the admit-card font cannot print")]
    UnsupportedCharacter { field: &'static str, ch: char },
}

/// Result of a successful render.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Download filename for a candidate's admit card.
pub fn admit_card_filename(name: &str) -> String {
    format!("admit_card_{}.pdf", WHITESPACE_RUN.replace_all(name, "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_replaces_whitespace_runs() {
        assert_eq!(admit_card_filename("Faaz Ahmad"), "admit_card_Faaz_Ahmad.pdf");
        assert_eq!(admit_card_filename("Zain  \t Ali"), "admit_card_Zain_Ali.pdf");
        assert_eq!(admit_card_filename("Risha"), "admit_card_Risha.pdf");
    }

    #[test]
    fn test_error_messages() {
        let err = AdmitCardError::Font("missing".to_string());
        assert_eq!(err.to_string(), "failed to register font: missing");
        let err = AdmitCardError::UnsupportedCharacter {
            field: "name",
            ch: '\u{100}',
        };
        assert!(err.to_string().starts_with("name contains"));
    }
}
