//! Session gate
//!
//! Decides whether a request carries an authenticated session, and tears
//! sessions down on logout.

use log::warn;

use crate::auth::CredentialStore;
use crate::session::flash::{FlashLevel, LOGGED_OUT, LOGIN_REQUIRED};
use crate::session::state::Session;

#[derive(Debug, PartialEq, Eq)]
pub enum GateDecision {
    Authorized(String),
    RedirectToLogin,
}

/// Returns the authenticated user, or queues a warning and asks for a redirect.
///
/// A session naming a user the store no longer knows is cleared and treated
/// as anonymous.
pub fn require_session(store: &CredentialStore, session: &mut Session) -> GateDecision {
    match session.user() {
        Some(user) if store.contains(user) => GateDecision::Authorized(user.to_string()),
        Some(user) => {
            warn!("Session for unknown user '{}' rejected", user);
            session.clear();
            session.flash(FlashLevel::Warning, LOGIN_REQUIRED);
            GateDecision::RedirectToLogin
        }
        None => {
            session.flash(FlashLevel::Warning, LOGIN_REQUIRED);
            GateDecision::RedirectToLogin
        }
    }
}

/// Destroys all session state and leaves a logout notice.
pub fn clear_session(session: &mut Session) {
    session.clear();
    session.flash(FlashLevel::Info, LOGGED_OUT);
}
