//! HTTP-facing error type.
//!
//! Every failure leaving a handler is an [`AppError`], rendered as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short URL not found", "details": { "short_code": "abc12" } } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use tracing::error;
use validator::ValidationErrors;

use crate::application::services::ShortUrlError;

/// Message returned when a short code does not exist.
pub const ERROR_SHORT_URL_NOT_FOUND: &str = "Short URL not found";

/// Message returned when no unique short code could be generated.
pub const ERROR_SHORT_CODE_CONFLICT: &str =
    "Short code conflict. Unable to generate a unique short code.";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShortUrlError> for AppError {
    fn from(e: ShortUrlError) -> Self {
        match e {
            ShortUrlError::NotFound(short_code) => AppError::not_found(
                ERROR_SHORT_URL_NOT_FOUND,
                json!({ "short_code": short_code }),
            ),
            ShortUrlError::ExhaustedRetries { attempts } => {
                error!("Unable to generate a unique short code after {} attempts", attempts);
                AppError::conflict(ERROR_SHORT_CODE_CONFLICT, json!({ "attempts": attempts }))
            }
            ShortUrlError::Storage(e) => {
                error!("Storage error: {}", e);
                AppError::internal("Storage error", json!({}))
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(e))
    }
}
