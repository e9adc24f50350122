// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;
use crate::services::gemini::LlmError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gemini API not configured. Please set GEMINI_API_KEY environment variable.")]
    NotConfigured,

    #[error("No response generated from Gemini API")]
    EmptyResponse,

    #[error("Internal server error: {0}")]
    Upstream(#[from] LlmError),

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotConfigured | AppError::EmptyResponse | AppError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InvalidBody { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
