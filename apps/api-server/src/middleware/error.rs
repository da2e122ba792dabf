//! Error handling - translation of domain failures to RFC 7807 responses.

use std::collections::BTreeMap;
use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use prensa_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized,
    Validation {
        field: &'static str,
        message: String,
    },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Validation { field, message } => {
                write!(f, "Validation failed on `{}`: {}", field, message)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Validation { field, message } => {
                let mut errors = BTreeMap::new();
                errors.insert(field.to_string(), vec![message.clone()]);
                ErrorResponse::validation(errors)
            }
            AppError::Internal(detail) => {
                // Log internal errors; clients only see a generic 500
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<prensa_core::error::DomainError> for AppError {
    fn from(err: prensa_core::error::DomainError) -> Self {
        match err {
            prensa_core::error::DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            prensa_core::error::DomainError::Validation { field, message } => {
                AppError::Validation {
                    field,
                    message: message.to_string(),
                }
            }
            prensa_core::error::DomainError::Unauthorized => AppError::Unauthorized,
            prensa_core::error::DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<prensa_core::error::RepoError> for AppError {
    fn from(err: prensa_core::error::RepoError) -> Self {
        match err {
            prensa_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            prensa_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            prensa_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
