use thiserror::Error;

use crate::users::UserError;

/// Outcomes of the register / login flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("invalid password")]
    InvalidPassword,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("user not found")]
    UserNotFound,
    #[error("incorrect password")]
    IncorrectPassword,
    #[error("failed to hash password: {0}")]
    PasswordHash(String),
    #[error("failed to save user: {0}")]
    FailedToSave(String),
    #[error("failed to get user ID")]
    FailedToGetId,
    #[error("failed to find user: {0}")]
    FailedToFind(String),
    #[error("failed to issue token: {0}")]
    Token(String),
}

impl AuthError {
    /// Stable numeric code for logs.
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidEmail => 1001,
            AuthError::InvalidPassword => 1002,
            AuthError::UserAlreadyExists => 1003,
            AuthError::UserNotFound => 1004,
            AuthError::IncorrectPassword => 1005,
            AuthError::PasswordHash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::FailedToSave(_) => 1201,
            AuthError::FailedToGetId => 1202,
            AuthError::FailedToFind(_) => 1203,
        }
    }

    /// Caller mistakes, as opposed to failures of this service or its store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidEmail
                | AuthError::InvalidPassword
                | AuthError::UserAlreadyExists
                | AuthError::UserNotFound
                | AuthError::IncorrectPassword
        )
    }
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::InvalidEmail => AuthError::InvalidEmail,
            UserError::InvalidPassword => AuthError::InvalidPassword,
            UserError::PasswordHash(msg) => AuthError::PasswordHash(msg),
            UserError::IncorrectPassword => AuthError::IncorrectPassword,
        }
    }
}
