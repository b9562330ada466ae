use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("salt generation failed")]
    Salt,

    #[error("password hashing failed")]
    Hash,
}

/// Hash a secret with Argon2id under a fresh random salt. Two calls with the
/// same secret produce different PHC strings; both verify.
pub fn hash_password(secret: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| PasswordError::Salt)?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|_| PasswordError::Salt)?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|_| PasswordError::Hash)?
        .to_string();

    Ok(phc)
}

/// Verify a secret against a stored PHC string. An unparseable hash verifies
/// as false rather than erroring; the caller only learns pass/fail.
pub fn verify_password(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
