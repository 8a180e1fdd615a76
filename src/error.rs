// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{message::ErrorResponse, services::upstream::UpstreamError};

pub const EMPTY_MESSAGE: &str = "message cannot be empty";
pub const MESSAGE_NOT_TEXT: &str = "message must be a string";
pub const PROCESSING_FAILED: &str = "a problem occurred while processing the message";

/// Everything a `/chat` call can fail with once it reaches the handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("history could not be read: {0}")]
    MalformedHistory(#[source] serde_json::Error),

    #[error("upstream model call failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn empty_message() -> Self {
        Self::BadRequest(EMPTY_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MalformedHistory(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = match self {
            Self::BadRequest(msg) => msg,
            Self::MalformedHistory(err) => {
                tracing::error!(error = %err, "chat history could not be read");
                PROCESSING_FAILED.to_string()
            }
            Self::Upstream(err) => {
                // Detail stays in the logs; callers only ever see the generic text.
                tracing::error!(error = %err, "model call failed");
                PROCESSING_FAILED.to_string()
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
