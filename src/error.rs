use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::auth::{
    dto::{ErrorResponse, FieldError},
    errors::AuthError,
};

/// Anything an HTTP handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be decoded into the request type.
    BadRequest(String),
    /// Body decoded but one or more fields failed their checks.
    Validation(Vec<FieldError>),
    Auth(AuthError),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl ApiError {
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "please check your input"),
            ApiError::Auth(e) => match e {
                AuthError::InvalidEmail => (StatusCode::BAD_REQUEST, "invalid email address"),
                AuthError::InvalidPassword => (
                    StatusCode::BAD_REQUEST,
                    "password must be at least 6 characters",
                ),
                AuthError::UserAlreadyExists => {
                    (StatusCode::CONFLICT, "email is already registered")
                }
                // Same answer for both so callers cannot tell which emails exist.
                AuthError::UserNotFound | AuthError::IncorrectPassword => (
                    StatusCode::UNAUTHORIZED,
                    "account not found or password invalid",
                ),
                AuthError::PasswordHash(_)
                | AuthError::FailedToSave(_)
                | AuthError::FailedToGetId
                | AuthError::FailedToFind(_)
                | AuthError::Token(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let errors = match self {
            ApiError::BadRequest(detail) => {
                warn!(%detail, "request body rejected");
                None
            }
            ApiError::Validation(errors) => {
                warn!(count = errors.len(), "request validation failed");
                Some(errors)
            }
            ApiError::Auth(e) if e.is_client_error() => {
                warn!(error = %e, code = e.code(), "auth request rejected");
                None
            }
            ApiError::Auth(e) => {
                error!(error = %e, code = e.code(), "auth request failed");
                None
            }
        };

        let body = ErrorResponse {
            success: false,
            message: message.to_string(),
            errors,
        };
        (status, Json(body)).into_response()
    }
}
