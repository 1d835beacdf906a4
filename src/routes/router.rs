//! HTTP router composition
//!
//! Extracts the session from the request, hands it to the matching route
//! handler and assembles the response.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Router, middleware};
use std::sync::Arc;

use crate::error::PortalError;
use crate::middleware::log_request;
use crate::routes::handlers::{
    handle_dashboard, handle_home, handle_login_form, handle_login_submit, handle_logout,
};
use crate::routes::outcome::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, LOGOUT_PATH, LoginForm};
use crate::routes::responses::build_response;
use crate::server::state::AppState;
use crate::session::Session;

pub fn portal_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HOME_PATH, get(home))
        .route(LOGIN_PATH, get(login_form).post(login_submit))
        .route(DASHBOARD_PATH, get(dashboard))
        .route(LOGOUT_PATH, get(logout))
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Response, PortalError> {
    build_response(&state.sessions, Session::default(), handle_home())
}

async fn login_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, PortalError> {
    let session = state.sessions.load(&headers);
    build_response(&state.sessions, session, handle_login_form())
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, PortalError> {
    let Form(form) = form.map_err(|rejection| PortalError::BadRequest(rejection.body_text()))?;
    let mut session = state.sessions.load(&headers);

    let store = Arc::clone(&state.store);
    let (session, result) = tokio::task::spawn_blocking(move || {
        let result = handle_login_submit(&store, &mut session, &form);
        (session, result)
    })
    .await
    .map_err(|e| PortalError::Internal(format!("login task failed: {e}")))?;

    build_response(&state.sessions, session, result)
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, PortalError> {
    let mut session = state.sessions.load(&headers);
    let result = handle_dashboard(&state.store, &mut session);
    build_response(&state.sessions, session, result)
}

async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, PortalError> {
    let mut session = state.sessions.load(&headers);
    let result = handle_logout(&mut session);
    build_response(&state.sessions, session, result)
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
