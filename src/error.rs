// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::RelayResponse;
use crate::services::completion::CompletionError;

/// Everything the relay endpoint can fail with. The `Display` text of the
/// user-facing variants is exactly what goes over the wire.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("OpenAI API key not configured")]
    MissingApiKey,

    #[error("upstream call failed: {0}")]
    Upstream(#[from] CompletionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller. Upstream detail is replaced by a
    /// fixed string; an unreadable upstream body counts as an internal error.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Upstream(CompletionError::Decode(_)) => "Internal server error".to_string(),
            AppError::Upstream(_) => "Failed to get response".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(e) => tracing::error!(error = %e, "completion service error"),
            AppError::MissingApiKey => tracing::error!("chat request rejected: OPENAI_API_KEY is not set"),
            AppError::MethodNotAllowed | AppError::BadRequest(_) => {
                tracing::debug!(error = %self, "chat request rejected")
            }
        }

        let body = RelayResponse::Error { error: self.public_message() };
        (self.status(), Json(body)).into_response()
    }
}
