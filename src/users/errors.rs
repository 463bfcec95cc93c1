use thiserror::Error;

/// Failures raised by the `User` entity itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("invalid password")]
    InvalidPassword,
    #[error("failed to hash password: {0}")]
    PasswordHash(String),
    #[error("incorrect password")]
    IncorrectPassword,
}

/// Failures raised by a `UserRepository`.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Unique constraint on `email` was hit.
    #[error("email already stored")]
    Duplicate,
    #[error("store did not report an id for the saved user")]
    MissingId,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
