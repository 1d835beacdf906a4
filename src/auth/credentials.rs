//! Credential storage
//!
//! Read-only username to bcrypt-hash table, built once from configuration
//! at startup and shared across requests without locking.

use log::{info, warn};
use std::collections::HashMap;

use super::password::{hash_password, looks_like_bcrypt};
use super::validator::{is_valid_password, is_valid_username};
use crate::config::UserEntry;
use crate::error::StoreError;

pub struct CredentialStore {
    users: HashMap<String, String>,
    /// Verified against for unknown usernames so both failure paths cost the same
    decoy_hash: String,
}

impl CredentialStore {
    /// Builds the store from configured users, hashing plaintext entries with `cost`.
    pub fn from_entries(entries: &[UserEntry], cost: u32) -> Result<Self, StoreError> {
        let mut users = HashMap::with_capacity(entries.len());

        for entry in entries {
            let username = entry.username.trim();
            if !is_valid_username(username) {
                return Err(StoreError::InvalidEntry(format!(
                    "username '{username}' is empty, too long or contains control characters"
                )));
            }

            if users.contains_key(username) {
                return Err(StoreError::DuplicateUser(username.to_string()));
            }

            let password_hash = match (&entry.password_hash, &entry.password) {
                (Some(stored), None) => {
                    if !looks_like_bcrypt(stored) {
                        return Err(StoreError::InvalidEntry(format!(
                            "password_hash for '{username}' is not a bcrypt hash"
                        )));
                    }
                    stored.clone()
                }
                (None, Some(plain)) => {
                    if !is_valid_password(plain) {
                        return Err(StoreError::InvalidEntry(format!(
                            "password for '{username}' is blank, too long or contains control characters"
                        )));
                    }
                    warn!("User '{}' configured with a plaintext password", username);
                    hash_password(plain, cost)
                        .map_err(|e| StoreError::HashingFailed(e.to_string()))?
                }
                _ => {
                    return Err(StoreError::InvalidEntry(format!(
                        "'{username}' must set exactly one of password_hash or password"
                    )));
                }
            };

            users.insert(username.to_string(), password_hash);
        }

        let decoy_hash = hash_password(&decoy_secret(), cost)
            .map_err(|e| StoreError::HashingFailed(e.to_string()))?;

        info!("Credential store loaded with {} user(s)", users.len());

        Ok(Self { users, decoy_hash })
    }

    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub(crate) fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }
}

fn decoy_secret() -> String {
    format!(
        "decoy-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}
