use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Request-scoped errors. Everything here is contained within one request's
/// response; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
