//! Common error types for Stagebook

use thiserror::Error;

/// Common result type for Stagebook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Stagebook crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// User-supplied form value failed validation
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// True for errors that should surface a field-specific message to the
    /// user rather than the generic write-failure message.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
