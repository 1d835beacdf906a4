//! Module `outcome`
//!
//! Data structures passed between the route handlers and the HTTP layer:
//! the parsed login form, the page to render and the overall result.

use serde::Deserialize;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGOUT_PATH: &str = "/logout";

/// Body of a login POST. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Pages the portal can render.
#[derive(Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard { user: String },
}

/// Represents the outcome of handling a request.
#[derive(Debug, PartialEq, Eq)]
pub enum PageStatus {
    Render(Page),
    Redirect(&'static str),
}

/// Struct encapsulating the full result of a route handler.
#[derive(Debug, PartialEq, Eq)]
pub struct PageResult {
    pub status: PageStatus,
}

impl PageResult {
    pub fn render(page: Page) -> Self {
        Self {
            status: PageStatus::Render(page),
        }
    }

    pub fn redirect(location: &'static str) -> Self {
        Self {
            status: PageStatus::Redirect(location),
        }
    }
}
