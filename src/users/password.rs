use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{UserError, UserResult};

/// Hashes `plain` with Argon2id at the crate's default cost, fresh salt per call.
pub fn hash_password(plain: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            UserError::Hash(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Succeeds only when `plain` matches the stored `hash`.
pub fn verify_password(hash: &str, plain: &str) -> UserResult<()> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        UserError::Hash(e.to_string())
    })?;
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .map_err(|_| UserError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        verify_password(&hash, password).expect("verify should succeed");
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        let err = verify_password(&hash, "wrong-password").unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("secret123").unwrap();
        let b = hash_password("secret123").unwrap();
        assert_ne!(a, b);
        verify_password(&a, "secret123").unwrap();
        verify_password(&b, "secret123").unwrap();
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("not-a-valid-hash", "anything").unwrap_err();
        assert!(matches!(err, UserError::Hash(_)));
        assert!(!err.to_string().is_empty());
    }
}
