//! Server core functionality
//!
//! This module contains the listener, the shared application state and the
//! serve loop for the login portal.

pub mod core;
pub mod state;

pub use self::core::{Server, build_app};
pub use state::AppState;
