//! HTTP routes
//!
//! Route handlers, page rendering and axum wiring for the portal's four endpoints.

pub mod handlers;
pub mod outcome;
pub mod responses;
pub mod router;
pub mod templates;

pub use outcome::{LoginForm, Page, PageResult, PageStatus};
pub use router::portal_router;
