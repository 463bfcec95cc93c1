use lazy_static::lazy_static;
use regex::Regex;
use sqlx::FromRow;
use time::OffsetDateTime;

use super::errors::UserError;
use super::password::{hash_password, verify_password};

pub const MAX_EMAIL_LEN: usize = 100;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Syntactic email check: dot-atom local part (letters of any script allowed),
/// ASCII hostname domain with at least one dot.
pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(
            r#"^[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"#
        )
        .unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Length is counted in characters, not bytes.
pub fn email_too_long(email: &str) -> bool {
    email.chars().count() > MAX_EMAIL_LEN
}

pub fn password_too_short(password: &str) -> bool {
    password.chars().count() < MIN_PASSWORD_LEN
}

/// User record. `password` holds the plaintext only between [`User::new`] and
/// the first [`User::prepare_for_save`]; from then on it is an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64, // 0 until the store assigns one
    pub email: String,
    pub password: String,
    pub created_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
    pub suspended_at: Option<OffsetDateTime>,
}

impl User {
    /// Validate an email/password pair and build an unsaved user.
    pub fn new(email: &str, password: &str) -> Result<Self, UserError> {
        if email.is_empty() || email_too_long(email) || !is_valid_email(email) {
            return Err(UserError::InvalidEmail);
        }
        if password.is_empty() || password_too_short(password) {
            return Err(UserError::InvalidPassword);
        }

        Ok(Self {
            id: 0,
            email: email.to_string(),
            password: password.to_string(),
            created_at: None,
            updated_at: None,
            suspended_at: None,
        })
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Stamp the record before it goes to the store.
    ///
    /// A new user gets its plaintext password replaced by a salted hash and
    /// both timestamps set. An already stored user only gets `updated_at`
    /// refreshed; its password is never re-hashed here.
    pub fn prepare_for_save(&mut self) -> Result<(), UserError> {
        let now = OffsetDateTime::now_utc();

        if self.is_new() {
            self.password = hash_password(&self.password)?;
            self.created_at = Some(now);
            self.updated_at = Some(now);
        } else {
            self.updated_at = Some(now);
        }

        Ok(())
    }

    /// Check a candidate password against the stored hash.
    ///
    /// A corrupt stored hash is reported the same way as a wrong password.
    pub fn check_password(&self, plain: &str) -> Result<bool, UserError> {
        if verify_password(plain, &self.password) {
            Ok(true)
        } else {
            Err(UserError::IncorrectPassword)
        }
    }
}
