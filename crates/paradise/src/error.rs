use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Request-level error for the edge handlers.
///
/// The JSON-facing variants keep the original message as the `error` field so
/// browser clients can surface it verbatim; the Display prefix is for logs.
#[derive(Debug, Error)]
pub enum AppError {
    /// Server-side configuration is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// An upstream service failed or returned a bad response
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The requested resource does not exist
    #[error("{0}")]
    NotFound(&'static str),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Config(message) => {
                tracing::error!("Configuration error: {message}");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
            AppError::Upstream(message) => {
                tracing::warn!("Upstream error: {message}");
                json_error(StatusCode::BAD_GATEWAY, &message)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::Internal(message) => {
                tracing::error!("Internal error: {message}");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
        }
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
