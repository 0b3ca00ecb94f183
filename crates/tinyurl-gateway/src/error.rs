use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tinyurl_core::{CoreError, ServiceError, StoreError};
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Application error codes carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    Internal = 99,
    Input = 100,
    Validation = 101,
    NoRoute = 102,
    NotFound = 103,
    Conflict = 104,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    /// The request body could not be read.
    Input(String),
    /// A field or path segment failed validation.
    Validation(String),
    NoRoute(String),
    NotFound(String),
    /// No free key could be found for a new mapping.
    Conflict(String),
    Internal(String),
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, &str) {
        match self {
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Input, msg.as_str()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::Validation, msg.as_str())
            }
            AppError::NoRoute(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoRoute, msg.as_str()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.as_str()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg.as_str()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal, msg.as_str())
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => AppError::Input(msg),
            ServiceError::NotFound(key) => AppError::NotFound(format!("no tiny url for key {key}")),
            ServiceError::StorageFailure(StoreError::Conflict(_)) => {
                AppError::Conflict("could not allocate a free key, try again".to_string())
            }
            other => {
                error!(error = %other, "request failed");
                AppError::Internal("internal server error".to_string())
            }
        }
    }
}

/// Malformed keys in a path.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ErrorResponse {
            code: code as u16,
            message: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
