// =============================================================================
// ERROR MODULE
// =============================================================================
// Service error type and its HTTP mapping.
//
// - Validation failures become 422 with the full issue list
// - Malformed request bodies become 400
// Errors are logged once, here, when they turn into a response.
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum AppError {
    /// Input did not satisfy a runtime schema
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Request body could not be read as the expected shape
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // 422: well-formed JSON that breaks the schema
            AppError::Validation(failure) => {
                tracing::warn!(
                    error_code = "VALIDATION_FAILED",
                    issues = failure.issues.len(),
                    "Request failed validation"
                );
                let message = failure.to_string();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::with_issues("VALIDATION_FAILED", message, failure.issues),
                )
            }

            AppError::BadRequest(msg) => {
                tracing::error!(error_code = "BAD_REQUEST", message = %msg, "Request failed");
                (StatusCode::BAD_REQUEST, ErrorResponse::new("BAD_REQUEST", msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
