//! Error types for the econcal ecosystem.

use thiserror::Error;

/// Errors that can occur in econcal operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Event '{id}' has a malformed timestamp: {value:?}")]
    MalformedTimestamp { id: String, value: String },

    #[error("Failed to fetch events: {0}")]
    FetchFailure(String),

    #[error("Duplicate event id: {0}")]
    DuplicateEventId(String),

    #[error("Unknown timezone '{0}'. Supported: Asia/Tehran, UTC, America/New_York, Europe/London")]
    UnknownTimezone(String),

    #[error("Unknown impact level '{0}'. Expected low, medium or high")]
    InvalidImpact(String),

    #[error("Unknown date range '{0}'. Expected today, tomorrow, week or custom")]
    InvalidDateRange(String),

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalendarError {
    /// Whether the error was caused by caller input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CalendarError::UnknownTimezone(_)
                | CalendarError::InvalidImpact(_)
                | CalendarError::InvalidDateRange(_)
                | CalendarError::InvalidDate(_)
        )
    }
}

/// Result type alias for econcal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
