use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::warn;

use crate::rms_api::AuthApiError;

/// Hashes `password` with Argon2id and a fresh random salt, returning the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, AuthApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthApiError::PasswordHashError(e.to_string()))
}

/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or an error if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthApiError::PasswordHashError(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthApiError::PasswordHashError(e.to_string())),
    }
}

/// Verifies `password` against `hash`, or against a throw-away hash when there is no account. Both paths cost the
/// same, so that response times do not reveal whether an email is registered.
pub fn verify_password_or_dummy(password: &str, hash: Option<&str>) -> bool {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    match hash {
        Some(hash) => verify_password(password, hash).unwrap_or_else(|e| {
            warn!("🔐️ Stored password hash could not be checked. {e}");
            false
        }),
        None => {
            if let Some(dummy) = DUMMY_HASH.get_or_init(|| hash_password("not-a-real-password").ok()) {
                let _ = verify_password(password, dummy);
            }
            false
        },
    }
}

/// [`hash_password`] on the blocking thread pool, keeping Argon2's CPU cost off the async workers.
pub async fn hash_password_off_thread(password: String) -> Result<String, AuthApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthApiError::PasswordHashError(e.to_string()))?
}

/// [`verify_password_or_dummy`] on the blocking thread pool.
pub async fn verify_password_off_thread(password: String, hash: Option<String>) -> bool {
    tokio::task::spawn_blocking(move || verify_password_or_dummy(&password, hash.as_deref())).await.unwrap_or_else(|e| {
        warn!("🔐️ Password check did not complete. {e}");
        false
    })
}
