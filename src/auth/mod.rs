//! Authentication system
//!
//! Credential storage, password hashing and credential validation.

pub mod credentials;
pub mod password;
pub mod validator;

pub use credentials::CredentialStore;
pub use validator::authenticate;
