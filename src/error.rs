//! Application error taxonomy and HTTP response mapping.
//!
//! Every component-level failure is a tagged [`AppError`]; the `IntoResponse`
//! implementation is the single place where a tagged failure becomes a status
//! code and a JSON body of the form:
//!
//! ```json
//! { "ok": false, "error": "<message>", "code": "<SHORT_CODE>" }
//! ```
//!
//! Internal failures (database faults, hashing errors) are logged server-side
//! with their details; the client only ever sees a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
    pub code: &'static str,
}

/// Tagged application error.
///
/// Each variant carries a short machine-readable `code`, a human-readable
/// `message`, and structured `details` used for server-side logging only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input; the caller can fix the request. Maps to 400.
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
        details: Value,
    },
    /// Missing, expired, or invalid credential. Maps to 401.
    #[error("{message}")]
    Unauthorized {
        code: &'static str,
        message: String,
        details: Value,
    },
    /// Entity does not exist, or exists but disclosure would leak its
    /// existence to a non-owner. Maps to 404.
    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: String,
        details: Value,
    },
    /// Duplicate identity or short code. Maps to 409.
    #[error("{message}")]
    Conflict {
        code: &'static str,
        message: String,
        details: Value,
    },
    /// Store fault, exhausted code allocation, or other operational failure.
    /// Maps to 500 with a generic client-facing message.
    #[error("{message}")]
    Internal {
        code: &'static str,
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
            details,
        }
    }

    pub fn internal(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            code,
            message: message.into(),
            details,
        }
    }

    /// Short machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. }
            | Self::Unauthorized { code, .. }
            | Self::NotFound { code, .. }
            | Self::Conflict { code, .. }
            | Self::Internal { code, .. } => code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation { code, message, .. } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Unauthorized { code, message, .. } => {
                (StatusCode::UNAUTHORIZED, code, message)
            }
            AppError::NotFound { code, message, .. } => (StatusCode::NOT_FOUND, code, message),
            AppError::Conflict { code, message, .. } => (StatusCode::CONFLICT, code, message),
            AppError::Internal {
                code,
                message,
                details,
            } => {
                // Log the real failure; never leak it to the client.
                tracing::error!(code, %message, %details, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            ok: false,
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "CONFLICT",
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal(
            "DB_ERROR",
            "Database error",
            json!({ "error": e.to_string() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "VALIDATION",
            "Validation failed",
            serde_json::to_value(&e).unwrap_or(Value::Null),
        )
    }
}
