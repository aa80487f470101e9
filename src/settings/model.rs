use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_NEXT_FORM_NUMBER: i64 = 24261;
pub const DEFAULT_NEXT_TOKEN_NUMBER: i64 = 62;
/// Key of the settings record in stores that keep named records.
pub const SETTINGS_KEY: &str = "numbering";

/// Numbering counters handed out to the next created candidate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[schema(example = 24261)]
    pub next_form_number: i64,
    #[schema(example = 62)]
    pub next_token_number: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            next_form_number: DEFAULT_NEXT_FORM_NUMBER,
            next_token_number: DEFAULT_NEXT_TOKEN_NUMBER,
        }
    }
}

/// Form and token numbers reserved for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub form_no: String,
    pub token_no: String,
}

impl Settings {
    /// Take the current counters and advance both by one.
    ///
    /// Returns `None` when either counter would overflow; `self` is left
    /// untouched in that case.
    pub fn allocate(&mut self) -> Option<Allocation> {
        let next_form = self.next_form_number.checked_add(1)?;
        let next_token = self.next_token_number.checked_add(1)?;

        let allocation = Allocation {
            form_no: self.next_form_number.to_string(),
            token_no: self.next_token_number.to_string(),
        };
        self.next_form_number = next_form;
        self.next_token_number = next_token;
        Some(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.next_form_number, 24261);
        assert_eq!(settings.next_token_number, 62);
    }

    #[test]
    fn test_allocate_returns_current_and_advances() {
        let mut settings = Settings {
            next_form_number: 100,
            next_token_number: 1,
        };
        let allocation = settings.allocate().unwrap();
        assert_eq!(allocation.form_no, "100");
        assert_eq!(allocation.token_no, "1");
        assert_eq!(settings.next_form_number, 101);
        assert_eq!(settings.next_token_number, 2);
    }

    #[test]
    fn test_allocate_overflow_leaves_settings_untouched() {
        let mut settings = Settings {
            next_form_number: 5,
            next_token_number: i64::MAX,
        };
        assert!(settings.allocate().is_none());
        assert_eq!(settings.next_form_number, 5);
        assert_eq!(settings.next_token_number, i64::MAX);
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["nextFormNumber"], 24261);
        assert_eq!(json["nextTokenNumber"], 62);
    }
}
