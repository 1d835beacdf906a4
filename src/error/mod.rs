//! Error handling
//!
//! Defines error types and handling for the login portal.

pub mod handlers;
pub mod types;

pub use types::*;
