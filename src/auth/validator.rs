//! Authentication validator
//!
//! Checks a username/password pair against the credential store. Unknown
//! users and wrong passwords are separate errors for logging, but callers
//! must present them identically.

use super::credentials::CredentialStore;
use super::password::verify_password;
use crate::error::AuthError;

const MAX_USERNAME_LENGTH: usize = 64;
/// bcrypt ignores input past 72 bytes
const MAX_PASSWORD_LENGTH: usize = 72;

/// Performs basic input sanitation to check for malicious or malformed usernames/passwords.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

/// Usernames `authenticate` will consider; the store refuses anything else.
pub(crate) fn is_valid_username(username: &str) -> bool {
    is_valid_input(username, MAX_USERNAME_LENGTH)
}

/// Passwords `authenticate` will consider; the store refuses anything else.
pub(crate) fn is_valid_password(password: &str) -> bool {
    is_valid_input(password, MAX_PASSWORD_LENGTH)
}

/// Verifies `password` for `username`. Stateless given the store.
pub fn authenticate(
    store: &CredentialStore,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    if !is_valid_username(username) {
        return Err(AuthError::MalformedInput("Invalid username format".into()));
    }

    if !is_valid_password(password) {
        return Err(AuthError::MalformedInput("Invalid password format".into()));
    }

    match store.lookup(username) {
        Some(stored) => match verify_password(password, stored) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AuthError::InvalidPassword(username.to_string())),
            Err(e) => Err(AuthError::HashingFailed(e.to_string())),
        },
        None => {
            // Burn the same bcrypt work as a real check; the result is irrelevant.
            let _ = verify_password(password, store.decoy_hash());
            Err(AuthError::UserNotFound(username.to_string()))
        }
    }
}
