//! Error types for the uvlens_core library.
//!
//! Only the I/O layer produces these. The calculator never fails.

use crate::location::LocationError;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for uvlens_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Weather/UV provider answered with a failure
    #[error("Weather fetch error: {0}")]
    Fetch(String),

    /// Location could not be determined
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// Stored profile is unreadable or malformed
    #[error("Profile error: {0}")]
    Profile(String),

    /// Reminder could not be scheduled
    #[error("Notification error: {0}")]
    Notification(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Fetch(_) | Error::Location(_) | Error::Profile(_)
        )
    }
}
