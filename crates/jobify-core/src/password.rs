//! Password hashing and verification.
//!
//! Passwords are hashed with bcrypt at [`DEFAULT_COST`]. Hashes are salted,
//! so hashing the same password twice yields different strings that both
//! verify.
//!
//! bcrypt is deliberately slow. Request handlers should use the `_async`
//! variants, which move the work onto tokio's blocking pool.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes a plaintext password.
///
/// # Errors
///
/// Returns an internal error if bcrypt fails; the operation must not continue.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored hash.
///
/// A mismatch is `Ok(false)`, not an error. A malformed stored hash is an
/// internal error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

pub async fn hash_password_async(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal_error(format!("Password hashing task failed: {}", e)))?
}

pub async fn verify_password_async(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal_error(format!("Password verification task failed: {}", e)))?
}
