//! Error types for the solar engine and its collaborators.
//!
//! Astronomy functions are total and never produce an error. What remains
//! is timezone resolution and configuration loading.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("local time {time} does not exist in {timezone}")]
    NonexistentLocalTime {
        timezone: String,
        time: NaiveDateTime,
    },

    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// True for failures a caller can shrug off (e.g. skip the local-time label).
    pub fn is_timezone_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownTimezone(_) | Error::NonexistentLocalTime { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
