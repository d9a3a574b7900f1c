//! Timestamp parsing for the artifact's loosely-formatted date fields.
//!
//! The producer mixes ISO timestamps with its own dotted format
//! depending on which code path wrote the field, so every timestamp
//! goes through the same ordered list of attempts.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Recognized formats, in priority order. The three are mutually
/// exclusive by separator choice; any future addition must keep the
/// most specific format first.
pub const FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// A timestamp string that matched none of the recognized formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized timestamp '{value}'")]
pub struct TimestampError {
    pub value: String,
}

/// Parses a timestamp under the first matching format.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    Err(TimestampError {
        value: value.to_string(),
    })
}
