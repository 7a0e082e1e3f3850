//! Voice CI Server
//!
//! HTTP endpoints for voice and text commands.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_error, record_request, record_request_latency};
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use voice_ci_commands::DispatchError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Intent not supported: {0}")]
    UnsupportedIntent(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::UnsupportedIntent(_) => StatusCode::BAD_REQUEST,
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::UnsupportedIntent(_) => "unsupported_intent",
            ServerError::Upstream(_) => "upstream",
            ServerError::Internal(_) => "internal",
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        err.status_code()
    }
}

impl From<DispatchError> for ServerError {
    fn from(err: DispatchError) -> Self {
        match &err {
            DispatchError::MissingText => ServerError::InvalidRequest(err.to_string()),
            DispatchError::UnregisteredIntent(_) => ServerError::UnsupportedIntent(err.to_string()),
            DispatchError::Nlu(e) => ServerError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        record_error(self.kind());
        let message = match &self {
            ServerError::InvalidRequest(m)
            | ServerError::UnsupportedIntent(m)
            | ServerError::Upstream(m)
            | ServerError::Internal(m) => m.clone(),
        };
        (self.status_code(), Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_ci_core::NluError;

    #[test]
    fn test_status_mapping() {
        let missing: ServerError = DispatchError::MissingText.into();
        assert_eq!(StatusCode::from(missing), StatusCode::BAD_REQUEST);

        let unsupported: ServerError = DispatchError::UnregisteredIntent("x".into()).into();
        assert_eq!(StatusCode::from(unsupported), StatusCode::BAD_REQUEST);

        let upstream: ServerError = DispatchError::Nlu(NluError::Network("down".into())).into();
        assert_eq!(StatusCode::from(upstream), StatusCode::BAD_GATEWAY);
    }
}
