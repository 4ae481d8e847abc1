//! Centralized error types for TextLens.

use thiserror::Error;

/// Main error type for analysis operations.
///
/// Every variant is terminal for the request that produced it.
#[derive(Error, Debug)]
pub enum NluError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Missing field in analysis response: {path}")]
    MissingField { path: String },

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for analysis operations.
pub type NluResult<T> = Result<T, NluError>;

impl NluError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a missing field error for the given response path.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication",
            Self::Transport(_) => "transport",
            Self::MissingField { .. } => "missing_field",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Validation(_) => "validation",
        }
    }
}

impl From<serde_json::Error> for NluError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
