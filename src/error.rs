// src/error.rs

//! Unified error handling for the scraper.
//!
//! Errors fall into two classes. Environment errors mean the process cannot
//! do its job at all (bad configuration, no usable HTTP client, unwritable
//! output directory) and end the process with a non-zero status.
//! Operational errors are scrape failures (network, timeouts, error status)
//! and are recovered by the pipeline into an empty snapshot.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Which side of the recovery boundary an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Setup problem; fatal, reported with exit status 1.
    Environment,
    /// Transient scrape failure; recorded in the snapshot, exit status 0.
    Operational,
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failed or timed out
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP client could not be constructed
    #[error("HTTP client unavailable: {0}")]
    Client(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Artifact could not be written or read
    #[error("Storage error at {path}: {message}")]
    Storage { path: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error for the given path.
    pub fn storage(path: impl AsRef<Path>, message: impl fmt::Display) -> Self {
        Self::Storage {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Classify the error for the recovery boundary.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Http(_) | Self::Io(_) | Self::Json(_) => ErrorClass::Operational,
            Self::Client(_)
            | Self::Toml(_)
            | Self::Url(_)
            | Self::Config(_)
            | Self::Validation(_)
            | Self::Storage { .. } => ErrorClass::Environment,
        }
    }

    /// Whether this error must end the process with a failure status.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_failures_are_operational() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(json);
        assert_eq!(err.class(), ErrorClass::Operational);
        assert!(!err.is_fatal());

        let io = AppError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.class(), ErrorClass::Operational);
    }

    #[test]
    fn storage_message_names_path() {
        let err = AppError::storage("data/results.json", "read-only file system");
        assert_eq!(
            err.to_string(),
            "Storage error at data/results.json: read-only file system"
        );
    }

    #[test]
    fn setup_failures_are_fatal() {
        assert!(AppError::config("bad").is_fatal());
        assert!(AppError::validation("bad").is_fatal());
        assert!(AppError::Client("no tls".to_string()).is_fatal());
        assert!(AppError::storage("data/results.json", "read-only").is_fatal());
    }
}
