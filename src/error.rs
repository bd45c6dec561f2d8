// src/error.rs

//! Unified error handling for the feed application.

use std::fmt;

use thiserror::Error;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Atom document could not be written
    #[error("Feed error: {0}")]
    Feed(#[from] atom_syndication::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The source site's markup no longer matches what the parser expects.
    #[error("Page structure changed at {context}: {message}")]
    Structure { context: String, message: String },

    /// Persisted state exists but cannot be decoded
    #[error("Corrupt state file {path}: {message}")]
    State { path: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a structural (fatal) page-format error with context.
    pub fn structure(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Structure {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a corrupt-state error.
    pub fn state(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::State {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
