//! Password hashing helpers.
//!
//! Hashes are argon2id in PHC string format, salted per call. Both functions
//! are pure functions of their inputs; plaintext never reaches storage or
//! logs.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{EngineError, ResultEngine};

/// Hashes `plain_text` with a fresh random salt.
pub fn hash(plain_text: &str) -> ResultEngine<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain_text.as_bytes(), &salt)
        .map_err(|err| EngineError::PasswordHash(err.to_string()))?;

    Ok(hash.to_string())
}

/// Checks `attempted` against a stored PHC hash string.
///
/// A malformed stored hash counts as a failed verification.
pub fn verify(stored_hash: &str, attempted: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(attempted.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_original_password() {
        let hash = hash("s3cret").unwrap();
        assert!(verify(&hash, "s3cret"));
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let hash = hash("s3cret").unwrap();
        assert!(!verify(&hash, "s3cret "));
        assert!(!verify(&hash, ""));
    }

    #[test]
    fn verify_rejects_a_malformed_hash() {
        assert!(!verify("not-a-phc-string", "s3cret"));
    }

    #[test]
    fn hash_is_salted() {
        let first = hash("s3cret").unwrap();
        let second = hash("s3cret").unwrap();
        assert_ne!(first, second);
    }
}
