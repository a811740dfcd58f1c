//! Password hashing and verification.
//!
//! Argon2id with the library's default work factor. Hashes are PHC strings,
//! so salt and parameters travel with the hash.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hash a password using Argon2id with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// Malformed hashes verify as `false`; the comparison itself is constant-time.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

lazy_static! {
    /// Stand-in hash verified when no account matches, so unknown phone
    /// numbers cost the same Argon2 work as wrong passwords.
    static ref DUMMY_HASH: String =
        hash_password("dummy-password-never-matches").expect("Argon2 hashing with default params");
}

/// Verify a login attempt against the account's hash, or against a dummy
/// hash when there is no account. Always runs a full Argon2 verification.
pub fn verify_credentials(password: &str, password_hash: Option<&str>) -> bool {
    match password_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            verify_password(password, &DUMMY_HASH);
            false
        }
    }
}
