use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{debug, error};

use super::errors::UserError;

/// Hash a plaintext password with a fresh random salt and the default argon2 parameters.
pub fn hash_password(plain: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            UserError::PasswordHash(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Returns `false` for a mismatch and for a stored value that is not a PHC hash.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "stored password is not a valid hash");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}
