//! Configuration management for the login portal
//!
//! Settings are read from `config.toml` and overridden by `PORTAL_*`
//! environment variables. The signing secret is expected to come from the
//! environment (`PORTAL_SECRET_KEY`); nested keys use a double underscore,
//! e.g. `PORTAL_SERVER__PORT=8080`.

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use log::warn;
use serde::Deserialize;
use std::fmt;

const SECRET_ENV_VAR: &str = "PORTAL_SECRET_KEY";
const MIN_SECRET_LENGTH: usize = 32;
const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Complete portal configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Key used to sign session cookies
    pub secret_key: SecretKey,

    #[serde(default)]
    pub server: NetworkConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Users loaded into the credential store at startup
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// Listener settings (restart required)
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Session cookie settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_secs: u64,
    /// Adds the `Secure` attribute; enable when served over HTTPS
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "portal_session".to_string(),
            ttl_secs: 12 * 60 * 60,
            secure_cookie: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// One configured user. Exactly one of `password_hash` or `password` is set.
#[derive(Deserialize, Clone)]
pub struct UserEntry {
    pub username: String,
    #[serde(default)]
    pub password_hash: Option<String>,
    /// Plaintext password, hashed at startup. Development only.
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .field("password_hash", &self.password_hash)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Signing secret; never printed
#[derive(Deserialize, Clone)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        // Try packaged path first, then development path
        let config_paths = ["login-portal/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Self::layered(File::with_name(config_path)) {
                Ok(settings) => return Self::from_settings(settings),
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(ConfigError::Message(format!(
            "Failed to load config.toml from any location. Tried: {config_paths:?}. Last error: {last_error:?}"
        )))
    }

    /// Build configuration from an in-memory TOML document plus environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::from_settings(Self::layered(File::from_str(toml, FileFormat::Toml))?)
    }

    fn layered<S>(source: S) -> Result<Config, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix("PORTAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;

        if std::env::var_os(SECRET_ENV_VAR).is_none() {
            warn!("secret_key read from config file; prefer setting {SECRET_ENV_VAR}");
        }

        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "secret_key must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".into()));
        }

        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Message(
                "server.bind_address cannot be empty".into(),
            ));
        }

        if self.session.cookie_name.is_empty()
            || !self
                .session
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Message(
                "session.cookie_name must be non-empty and contain only [A-Za-z0-9_-]".into(),
            ));
        }

        if !(1..=MAX_SESSION_TTL_SECS).contains(&self.session.ttl_secs) {
            return Err(ConfigError::Message(format!(
                "session.ttl_secs must be between 1 and {MAX_SESSION_TTL_SECS}"
            )));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Message(format!(
                "auth.bcrypt_cost must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"
            )));
        }

        if self.users.is_empty() {
            return Err(ConfigError::Message(
                "at least one [[users]] entry is required".into(),
            ));
        }

        for user in &self.users {
            match (&user.password_hash, &user.password) {
                (Some(_), None) | (None, Some(_)) => {}
                _ => {
                    return Err(ConfigError::Message(format!(
                        "user '{}' must set exactly one of password_hash or password",
                        user.username
                    )));
                }
            }
        }

        Ok(())
    }
}

impl NetworkConfig {
    /// Get bind address and port as socket address
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
