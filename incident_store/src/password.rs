//! Salted, deliberately slow password hashing.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`),
//! so the salt and cost parameters travel with the hash.
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::StoreError;

/// Hashes `plaintext` with a freshly generated random salt.
///
/// # Errors
/// Returns `StoreError::PasswordHash` if the hasher rejects the input
pub fn hash_password(plaintext: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(plaintext.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks `plaintext` against a PHC string produced by `hash_password()`.
///
/// # Errors
/// Returns `StoreError::PasswordHash` if `phc_hash` is not a valid PHC string
pub fn verify_password(plaintext: &str, phc_hash: &str) -> Result<bool, StoreError> {
    let parsed = PasswordHash::new(phc_hash)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
