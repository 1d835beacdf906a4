//! Shared application state
//!
//! Everything here is read-only after startup, so handlers share it through
//! an `Arc` without locking.

use std::sync::Arc;

use crate::auth::CredentialStore;
use crate::session::SessionCodec;

pub struct AppState {
    pub store: Arc<CredentialStore>,
    pub sessions: SessionCodec,
}

impl AppState {
    pub fn new(store: CredentialStore, sessions: SessionCodec) -> Self {
        Self {
            store: Arc::new(store),
            sessions,
        }
    }
}
