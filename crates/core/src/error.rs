//! Error types shared across crates

use thiserror::Error;

/// Errors raised by a CI server collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CiError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            CiError::NotFound(_) => "not_found",
            CiError::Api { .. } => "api",
            CiError::Network(_) => "network",
            CiError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Errors raised by an NLU collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NluError {
    #[error("NLU request failed: {0}")]
    Network(String),

    #[error("NLU API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid NLU response: {0}")]
    InvalidResponse(String),
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Ci(#[from] CiError),

    #[error(transparent)]
    Nlu(#[from] NluError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
