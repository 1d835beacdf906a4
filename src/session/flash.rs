//! Flash messages
//!
//! One-shot notifications carried in the session until the next rendered page.

use serde::{Deserialize, Serialize};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const LOGIN_REQUIRED: &str = "Please log in first";
pub const LOGGED_OUT: &str = "You’ve been logged out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Danger,
    Warning,
    Info,
    Success,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Danger => "danger",
            FlashLevel::Warning => "warning",
            FlashLevel::Info => "info",
            FlashLevel::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
