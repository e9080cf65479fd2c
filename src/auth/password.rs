//! Password hashing and verification using bcrypt
//!
//! The comparison itself is delegated to the bcrypt crate, which is
//! constant-time at the hash level; no extra timing protection is added
//! here.

use crate::core::error::Result;

/// Hash a plaintext password with the default bcrypt cost
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Verify a plaintext candidate against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}
