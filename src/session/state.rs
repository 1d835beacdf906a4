//! Module `state`
//!
//! Defines the `Session` struct: the per-request view of one browser's signed
//! session cookie, including the authenticated user and pending flashes.

use crate::session::flash::{Flash, FlashLevel};

/// Contents of a session as carried in the cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub user: Option<String>,
    pub flashes: Vec<Flash>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.flashes.is_empty()
    }
}

/// Request-scoped session.
///
/// Tracks whether anything changed so the cookie is only rewritten when needed.
#[derive(Debug, Default)]
pub struct Session {
    data: SessionData,
    modified: bool,
}

impl Session {
    /// Wraps data decoded from a cookie; starts unmodified.
    pub fn from_data(data: SessionData) -> Self {
        Self {
            data,
            modified: false,
        }
    }

    /// Empty session that still rewrites the cookie, used when the
    /// incoming cookie failed verification.
    pub fn invalidated() -> Self {
        Self {
            data: SessionData::default(),
            modified: true,
        }
    }

    /// Starts a fresh authenticated session, discarding everything else.
    pub fn establish(&mut self, username: &str) {
        self.data = SessionData {
            user: Some(username.to_string()),
            flashes: Vec::new(),
        };
        self.modified = true;
    }

    /// Destroys all session state.
    pub fn clear(&mut self) {
        if !self.data.is_empty() {
            self.modified = true;
        }
        self.data = SessionData::default();
    }

    /// Queues a flash for the next rendered page.
    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.data.flashes.push(Flash::new(level, message));
        self.modified = true;
    }

    /// Removes and returns pending flashes.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if !self.data.flashes.is_empty() {
            self.modified = true;
        }
        std::mem::take(&mut self.data.flashes)
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Returns the authenticated username, if any.
    pub fn user(&self) -> Option<&str> {
        self.data.user.as_deref()
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.data.flashes
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Returns whether the cookie needs to be rewritten.
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
