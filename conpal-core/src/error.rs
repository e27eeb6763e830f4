//! Error types for the conpal ecosystem.

use thiserror::Error;

/// Errors that can occur in conpal operations.
#[derive(Error, Debug)]
pub enum ConpalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Unknown time zone: {0}")]
    TimeZone(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Calendar host error: {0}")]
    CalendarHost(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for conpal operations.
pub type ConpalResult<T> = Result<T, ConpalError>;
