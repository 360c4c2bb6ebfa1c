//! Custom error types with proper HTTP status code mappings.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Domain errors with HTTP status code mappings. Mirrors the taxonomy in
/// spec §7: validation, not-found, integrity, unavailable, internal.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Validation error (400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Multiple validation errors (400/422)
    #[error("Validation failed")]
    ValidationErrors(Vec<String>),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Operation violates an invariant, e.g. duplicate card creation (409)
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// A dependency is absent or unreachable: database, LLM runtime,
    /// synthesizer binary (503)
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500)
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    /// Database error (500)
    #[error("Database error")]
    Database(String),
}

impl DomainError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::ValidationErrors(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Integrity(_) => StatusCode::CONFLICT,
            DomainError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Internal(_) | DomainError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Create a validation error from validator errors
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error
                            .message
                            .as_ref()
                            .unwrap_or(&std::borrow::Cow::Borrowed("validation failed"))
                    )
                })
            })
            .collect();

        if messages.is_empty() {
            DomainError::Validation("Invalid input".to_string())
        } else {
            DomainError::ValidationErrors(messages)
        }
    }
}

/// Implement IntoResponse for DomainError to integrate with Axum
impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if matches!(self, DomainError::Internal(_) | DomainError::Database(_)) {
            tracing::error!("Internal error: {}", self);
        }

        let body = match &self {
            DomainError::ValidationErrors(details) => ErrorResponse {
                detail: "Validation failed".to_string(),
                details: Some(details.clone()),
            },
            _ => ErrorResponse {
                detail: self.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Database(err.to_string())
    }
}
