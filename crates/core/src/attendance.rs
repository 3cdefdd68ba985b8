//! Attendance status and the rules applied to an attendance submission.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Upper bound on extra (non-member) players a single attendee may bring.
pub const MAX_ADDITIONAL_PLAYERS: i32 = 3;

/// Longest comment accepted on an attendance, in characters.
pub const MAX_COMMENT_LENGTH: usize = 500;

/// RSVP status of one user for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "attendance_status", rename_all = "lowercase")
)]
pub enum AttendanceStatus {
    Confirmed,
    Declined,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }

    pub fn is_confirmed(self) -> bool {
        self == Self::Confirmed
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            other => Err(CoreError::Validation(format!(
                "Unknown attendance status '{other}' (expected confirmed or declined)"
            ))),
        }
    }
}

/// Resolve the stored extra-player count for a submission.
///
/// A missing value means zero. Values outside `0..=MAX_ADDITIONAL_PLAYERS`
/// are rejected.
pub fn resolve_additional_players(value: Option<i32>) -> Result<i32, CoreError> {
    let players = value.unwrap_or(0);
    if !(0..=MAX_ADDITIONAL_PLAYERS).contains(&players) {
        return Err(CoreError::Validation(format!(
            "additional_players must be between 0 and {MAX_ADDITIONAL_PLAYERS}"
        )));
    }
    Ok(players)
}

/// Normalize a free-text comment: blank becomes `None`, surrounding
/// whitespace is trimmed, and overlong comments are rejected.
pub fn normalize_comment(comment: Option<String>) -> Result<Option<String>, CoreError> {
    let Some(comment) = comment else {
        return Ok(None);
    };
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&AttendanceStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let parsed: AttendanceStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Declined);
    }

    #[test]
    fn status_from_str_accepts_only_the_two_values() {
        assert_eq!("confirmed".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Confirmed);
        assert_eq!("declined".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Declined);
        for other in ["maybe", "yes", "no", "Confirmed", " declined"] {
            assert!(other.parse::<AttendanceStatus>().is_err(), "{other:?} parsed");
        }
    }

    #[test]
    fn missing_additional_players_defaults_to_zero() {
        assert_eq!(resolve_additional_players(None).unwrap(), 0);
        assert_eq!(resolve_additional_players(Some(3)).unwrap(), 3);
    }

    #[test]
    fn additional_players_out_of_range_is_rejected() {
        assert!(resolve_additional_players(Some(-1)).is_err());
        assert!(resolve_additional_players(Some(MAX_ADDITIONAL_PLAYERS + 1)).is_err());
    }

    #[test]
    fn blank_comment_becomes_none() {
        assert_eq!(normalize_comment(None).unwrap(), None);
        assert_eq!(normalize_comment(Some("   ".into())).unwrap(), None);
        assert_eq!(
            normalize_comment(Some("  late by 10 min ".into())).unwrap(),
            Some("late by 10 min".to_string())
        );
    }

    #[test]
    fn overlong_comment_is_rejected() {
        let long = "x".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(normalize_comment(Some(long)).is_err());
    }
}
