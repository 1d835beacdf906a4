//! Session management
//!
//! Client-held signed sessions, flash messages and the session gate.

pub mod flash;
pub mod gate;
pub mod state;
pub mod token;

pub use flash::{Flash, FlashLevel};
pub use gate::{GateDecision, clear_session, require_session};
pub use state::{Session, SessionData};
pub use token::SessionCodec;
