//! Password hashing
//!
//! Thin wrappers over bcrypt so the rest of the crate never touches the
//! hashing library directly.

use bcrypt::{BcryptError, hash, verify};

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}

/// Cheap structural check that a configured hash is a bcrypt hash.
pub fn looks_like_bcrypt(password_hash: &str) -> bool {
    password_hash.len() == 60
        && ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| password_hash.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("password123", 4).unwrap();
        assert!(looks_like_bcrypt(&hashed));
        assert_ne!(hashed, "password123");
        assert!(verify_password("password123", &hashed).unwrap());
        assert!(!verify_password("wrongpass", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same", 4).unwrap();
        let second = hash_password("same", 4).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_rejects_non_bcrypt() {
        assert!(!looks_like_bcrypt("password123"));
        assert!(!looks_like_bcrypt("$argon2id$v=19$m=65536,t=3,p=4$abc"));
    }
}
