use std::fmt;
use thiserror::Error;

/// The application-wide error type.
///
/// Each crate keeps its own error enum and converts into `BuzzError` at the
/// boundary to the binary.
#[derive(Error, Debug)]
pub enum BuzzError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// User input that matches no accepted grammar
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// The fetched page did not contain a usable availability table
    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error to the process exit status used by the checker binary.
pub trait ExitStatus {
    /// Returns the exit status for this error.
    fn exit_code(&self) -> i32;
}

impl ExitStatus for BuzzError {
    fn exit_code(&self) -> i32 {
        match self {
            BuzzError::ValidationError(_) => 2,
            BuzzError::ConfigError(_) => 78,
            BuzzError::HttpError(_)
            | BuzzError::ParseError(_)
            | BuzzError::ExtractionError(_)
            | BuzzError::InternalError(_) => 1,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, BuzzError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, BuzzError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, BuzzError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| BuzzError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, BuzzError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| BuzzError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for BuzzError {
    fn from(err: reqwest::Error) -> Self {
        BuzzError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BuzzError {
    fn from(err: serde_json::Error) -> Self {
        BuzzError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for BuzzError {
    fn from(err: config::ConfigError) -> Self {
        BuzzError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for BuzzError {
    fn from(err: std::io::Error) -> Self {
        BuzzError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BuzzError {
    BuzzError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BuzzError {
    BuzzError::ValidationError(message.to_string())
}

pub fn extraction_error<T: fmt::Display>(message: T) -> BuzzError {
    BuzzError::ExtractionError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> BuzzError {
    BuzzError::InternalError(message.to_string())
}
