//! Error types for millennial.

use thiserror::Error;

/// Errors that can occur while driving a calendar.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Could not parse '{input}' with format '{format}'")]
    Parse { input: String, format: String },

    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Cannot display {year}-{month:02}: its weeks run past the supported date range")]
    OutOfRange { year: i32, month: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
