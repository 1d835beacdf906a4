//! Route handlers for the login portal.
//!
//! Each handler works on the request-scoped `Session` and returns a
//! `PageResult`; turning that into an HTTP response happens in `responses`.
//! Handlers never touch headers, which keeps them testable without a server.

use log::info;

use crate::auth::{CredentialStore, authenticate};
use crate::routes::outcome::{DASHBOARD_PATH, LOGIN_PATH, LoginForm, Page, PageResult};
use crate::session::flash::INVALID_CREDENTIALS;
use crate::session::{FlashLevel, GateDecision, Session, clear_session, require_session};

/// `GET /`: always sends the caller to the login page.
pub fn handle_home() -> PageResult {
    PageResult::redirect(LOGIN_PATH)
}

/// `GET /login`
pub fn handle_login_form() -> PageResult {
    PageResult::render(Page::Login)
}

/// `POST /login`: establishes a session on success, re-renders the form otherwise.
///
/// Runs a bcrypt verification; call it off the async executor.
pub fn handle_login_submit(
    store: &CredentialStore,
    session: &mut Session,
    form: &LoginForm,
) -> PageResult {
    match authenticate(store, &form.username, &form.password) {
        Ok(()) => {
            info!("User '{}' logged in", form.username);
            session.establish(&form.username);
            PageResult::redirect(DASHBOARD_PATH)
        }
        Err(e) => {
            info!("Login rejected: {}", e);
            session.flash(FlashLevel::Danger, INVALID_CREDENTIALS);
            PageResult::render(Page::Login)
        }
    }
}

/// `GET /dashboard`: only for authenticated sessions.
pub fn handle_dashboard(store: &CredentialStore, session: &mut Session) -> PageResult {
    match require_session(store, session) {
        GateDecision::Authorized(user) => PageResult::render(Page::Dashboard { user }),
        GateDecision::RedirectToLogin => PageResult::redirect(LOGIN_PATH),
    }
}

/// `GET /logout`: clears the session unconditionally.
pub fn handle_logout(session: &mut Session) -> PageResult {
    if let Some(user) = session.user() {
        info!("User '{}' logged out", user);
    }
    clear_session(session);
    PageResult::redirect(LOGIN_PATH)
}
