//! Password hashing via bcrypt.
//!
//! bcrypt embeds a fresh salt per call, so hashing the same plaintext twice
//! yields different digests, and its verify compares in constant time.

use bcrypt::BcryptError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password for storage.
///
/// # Errors
///
/// Returns an error when bcrypt fails internally, never for any particular
/// plaintext value.
pub fn hash_password(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, BCRYPT_COST)
}

/// Verify a plaintext password against a stored digest.
///
/// # Errors
///
/// Returns an error when `digest` is not a valid bcrypt string.
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, digest)
}
