//! Error types
//!
//! Defines domain-specific error types for each module of the login portal.

use std::fmt;
use std::io;

/// Authentication module errors
///
/// These never reach the caller verbatim; every variant surfaces as the same
/// "Invalid username or password" flash.
#[derive(Debug)]
pub enum AuthError {
    UserNotFound(String),
    InvalidPassword(String),
    MalformedInput(String),
    HashingFailed(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UserNotFound(u) => write!(f, "User not found: {}", u),
            AuthError::InvalidPassword(u) => write!(f, "Invalid password for user: {}", u),
            AuthError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
            AuthError::HashingFailed(s) => write!(f, "Password hashing failed: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

/// Credential store construction errors
#[derive(Debug)]
pub enum StoreError {
    DuplicateUser(String),
    InvalidEntry(String),
    HashingFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateUser(u) => write!(f, "Duplicate user: {}", u),
            StoreError::InvalidEntry(s) => write!(f, "Invalid user entry: {}", s),
            StoreError::HashingFailed(s) => write!(f, "Password hashing failed: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

/// Session module errors
#[derive(Debug)]
pub enum SessionError {
    Encode(String),
    Decode(String),
    InvalidHeader(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Encode(s) => write!(f, "Failed to encode session: {}", s),
            SessionError::Decode(s) => write!(f, "Failed to decode session: {}", s),
            SessionError::InvalidHeader(s) => write!(f, "Invalid session cookie header: {}", s),
        }
    }
}

impl std::error::Error for SessionError {}

/// General portal error that encompasses all error types
#[derive(Debug)]
pub enum PortalError {
    Store(StoreError),
    Session(SessionError),
    BadRequest(String),
    IoError(io::Error),
    Internal(String),
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortalError::Store(e) => write!(f, "Credential store error: {}", e),
            PortalError::Session(e) => write!(f, "Session error: {}", e),
            PortalError::BadRequest(e) => write!(f, "Bad request: {}", e),
            PortalError::IoError(e) => write!(f, "I/O error: {}", e),
            PortalError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for PortalError {}

// Implement conversions from specific errors to PortalError
impl From<StoreError> for PortalError {
    fn from(error: StoreError) -> Self {
        PortalError::Store(error)
    }
}

impl From<SessionError> for PortalError {
    fn from(error: SessionError) -> Self {
        PortalError::Session(error)
    }
}

impl From<io::Error> for PortalError {
    fn from(error: io::Error) -> Self {
        PortalError::IoError(error)
    }
}
