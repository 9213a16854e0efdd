//! Argon2id password hashing.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use shelf_db::{RepoError, RepoResult};

const DUMMY_PASSWORD: &str = "shelf-unknown-user";

/// Hash a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> RepoResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RepoError::Password(e.to_string()))
}

/// Check a password against a stored PHC string. Malformed hashes never verify.
pub fn verify_password(password: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        tracing::warn!("stored password hash is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// The stored hash, or for an unknown user a dummy one with the same cost,
/// so both rejections take one full verification.
pub fn stored_or_dummy(stored: Option<&str>) -> &str {
    stored.unwrap_or_else(|| dummy_hash())
}

fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password(DUMMY_PASSWORD).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        assert!(!verify_password("password123", "password123"));
    }

    #[test]
    fn unknown_user_is_checked_against_an_equally_costly_hash() {
        let real = hash_password("password123").unwrap();
        let real = PasswordHash::new(&real).unwrap();
        let dummy = PasswordHash::new(stored_or_dummy(None)).unwrap();

        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(dummy.params.to_string(), real.params.to_string());
        assert!(!verify_password("password123", stored_or_dummy(None)));
    }

    #[test]
    fn stored_hash_is_preferred() {
        assert_eq!(stored_or_dummy(Some("$argon2id$stored")), "$argon2id$stored");
    }
}
