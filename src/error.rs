use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Field-level detail for a 400 validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Every failure a request can end with. Recovered at the handler boundary
/// and mapped to a status + JSON body; nothing propagates past it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Duplicate(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing bearer token")]
    Unauthenticated,
    #[error("invalid token")]
    InvalidToken,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::NotFound("Record not found");
        }
        if let sqlx::Error::Database(db) = &e {
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                return AppError::Duplicate("Duplicate entry");
            }
        }
        AppError::Internal(e.into())
    }
}

/// Replaces the generic duplicate message with one naming the colliding
/// key(s); every other error passes through unchanged.
pub fn on_duplicate(e: sqlx::Error, what: &'static str) -> AppError {
    match AppError::from(e) {
        AppError::Duplicate(_) => AppError::Duplicate(what),
        other => other,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            AppError::Duplicate(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid credentials." }),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Access denied. No token provided." }),
            ),
            AppError::InvalidToken => {
                (StatusCode::FORBIDDEN, json!({ "error": "Invalid token" }))
            }
            AppError::Internal(source) => {
                // Detail goes to the log, never to the caller.
                error!(error = %source, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
