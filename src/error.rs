//! Error types for the HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lookalike_search::SearchError;

/// Errors a request handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The caller sent an invalid request.
    #[error("{0}")]
    BadRequest(String),

    /// The route exists but the feature behind it does not.
    #[error("{0}")]
    NotImplemented(String),

    /// Anything else. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        if err.is_caller_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(msg) | Self::NotImplemented(msg) => msg.clone(),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "internal error".to_owned()
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Convenience result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
