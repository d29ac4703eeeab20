// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions


// Re-export error types and utilities for easier access
pub use error::{
    config_error, extraction_error, internal_error, validation_error, BuzzError, Context,
    ExitStatus,
};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, get_text};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use services::{BoxFuture, PageFetcher};

// This crate provides the functionality shared by the checker crates:
// the application error type, logging setup, the HTTP client and the
// page fetcher abstraction.
