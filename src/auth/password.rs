use bcrypt::{hash, verify};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must be no more than 72 bytes long")]
    TooLong,
    #[error("Failed to hash password")]
    HashingFailed,
    #[error("Failed to verify password")]
    VerificationFailed,
}

/// bcrypt ignores everything past this many bytes
pub const BCRYPT_MAX_BYTES: usize = 72;

/// Password length requirements: at least `min_length` characters and at most
/// `max_bytes` bytes of UTF-8.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_bytes: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_bytes: BCRYPT_MAX_BYTES,
        }
    }
}

/// Validate password length according to policy
pub fn validate_password_strength(password: &str, policy: &PasswordPolicy) -> Result<(), PasswordError> {
    if password.chars().count() < policy.min_length {
        return Err(PasswordError::TooShort);
    }

    if password.len() > policy.max_bytes {
        return Err(PasswordError::TooLong);
    }

    Ok(())
}

/// Hash a password using bcrypt with the given cost factor
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    validate_password_strength(password, &PasswordPolicy::default())?;

    hash(password, cost).map_err(|_| PasswordError::HashingFailed)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    // Stored passwords never exceed the limit; a longer candidate would be truncated into a match
    if password.len() > BCRYPT_MAX_BYTES {
        return Ok(false);
    }

    verify(password, hash).map_err(|_| PasswordError::VerificationFailed)
}
