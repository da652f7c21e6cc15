/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which automatically converts
/// to the appropriate status code and a `{ error, message, details? }`
/// JSON body.
///
/// The taxonomy distinguishes a missing identity (`Unauthenticated`) from
/// a presented-but-invalid credential (`AuthenticationFailed`): the latter
/// is raised at the request boundary and aborts the call before any
/// operation logic runs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use todograph_shared::{
    auth::{password::PasswordError, token::TokenError},
    store::StoreError,
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// No identity where one is required (401)
    Unauthenticated(String),

    /// Token present but invalid - boundary-level hard failure (401)
    AuthenticationFailed(String),

    /// Password mismatch on sign-in (401)
    InvalidCredential(String),

    /// Entity or owned-entity lookup miss (404)
    NotFound(String),

    /// Duplicate unique key on registration (409)
    Conflict(String),

    /// Empty required field (422)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Update call with no effective change requested (400)
    InvalidArgument(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "invalid_credential")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ApiError::AuthenticationFailed(msg) => write!(f, "Authentication failed: {}", msg),
            ApiError::InvalidCredential(msg) => write!(f, "Invalid credential: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", msg, None)
            }
            ApiError::AuthenticationFailed(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication_failed", msg, None)
            }
            ApiError::InvalidCredential(msg) => {
                (StatusCode::UNAUTHORIZED, "invalid_credential", msg, None)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InvalidArgument(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_argument", msg, None)
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate("email") => {
                ApiError::Conflict("Email already exists".to_string())
            }
            StoreError::Duplicate(field) => {
                ApiError::Conflict(format!("Duplicate value for {}", field))
            }
            StoreError::Database(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Convert token errors to API errors
///
/// Verification failures are boundary-level authentication failures;
/// issuance failures are internal.
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::CreateError(msg) => {
                ApiError::InternalError(format!("Token creation failed: {}", msg))
            }
            TokenError::Expired => {
                ApiError::AuthenticationFailed("Invalid or expired token".to_string())
            }
            TokenError::Invalid(msg) => ApiError::AuthenticationFailed(msg),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert request-validation errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    }
}
