//! Rules for event creation and editing.

use chrono::NaiveTime;

use crate::error::CoreError;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_LOCATION_LENGTH: usize = 200;

/// Trim a required text field and check its length.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// An event must end after it starts. Events spanning midnight are not
/// supported.
pub fn validate_time_window(time_from: NaiveTime, time_to: NaiveTime) -> Result<(), CoreError> {
    if time_to <= time_from {
        return Err(CoreError::Validation(
            "time_to must be later than time_from".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn time_window_must_be_positive() {
        assert!(validate_time_window(t(18, 0), t(20, 0)).is_ok());
        assert!(validate_time_window(t(18, 0), t(18, 0)).is_err());
        assert!(validate_time_window(t(20, 0), t(18, 0)).is_err());
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("title", "  Training ", 50).unwrap(), "Training");
        assert!(require_text("title", "   ", 50).is_err());
        assert!(require_text("title", "abcdef", 5).is_err());
    }
}
