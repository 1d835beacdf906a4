//! Signed session cookies
//!
//! Session contents travel to the browser as an HS256 JWT keyed with the
//! server secret. Anything that fails verification is treated as no session.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{SecretKey, SessionConfig};
use crate::error::SessionError;
use crate::session::flash::Flash;
use crate::session::state::{Session, SessionData};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flashes: Vec<Flash>,
    iat: u64,
    exp: u64,
}

/// Encodes, verifies and (de)serializes session cookies.
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    cookie_name: String,
    ttl_secs: u64,
    secure: bool,
}

impl SessionCodec {
    pub fn new(secret: &SecretKey, config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            cookie_name: config.cookie_name.clone(),
            ttl_secs: config.ttl_secs,
            secure: config.secure_cookie,
        }
    }

    /// Reads the caller's session from request headers. Fails closed.
    pub fn load(&self, headers: &HeaderMap) -> Session {
        let Some(token) = read_cookie(headers, &self.cookie_name) else {
            return Session::default();
        };

        match self.decode(token) {
            Ok(data) => Session::from_data(data),
            Err(e) => {
                debug!("Discarding session cookie: {}", e);
                Session::invalidated()
            }
        }
    }

    pub fn encode(&self, data: &SessionData) -> Result<String, SessionError> {
        self.encode_at(data, now())
    }

    fn encode_at(&self, data: &SessionData, issued_at: u64) -> Result<String, SessionError> {
        let claims = SessionClaims {
            user: data.user.clone(),
            flashes: data.flashes.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Encode(e.to_string()))
    }

    pub fn decode(&self, token: &str) -> Result<SessionData, SessionError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| SessionData {
                user: token_data.claims.user,
                flashes: token_data.claims.flashes,
            })
            .map_err(|e| SessionError::Decode(e.to_string()))
    }

    /// Builds the `Set-Cookie` value for `session`; an empty session expires the cookie.
    pub fn set_cookie(&self, session: &Session) -> Result<HeaderValue, SessionError> {
        let secure = if self.secure { "; Secure" } else { "" };

        let cookie = if session.data().is_empty() {
            format!(
                "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
                self.cookie_name, secure
            )
        } else {
            let token = self.encode(session.data())?;
            format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
                self.cookie_name, token, secure
            )
        };

        HeaderValue::from_str(&cookie).map_err(|e| SessionError::InvalidHeader(e.to_string()))
    }
}

/// Finds the named cookie across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::flash::FlashLevel;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn codec_with(secret: &str, secure: bool) -> SessionCodec {
        let config = SessionConfig {
            cookie_name: "portal_session".into(),
            ttl_secs: 3600,
            secure_cookie: secure,
        };
        SessionCodec::new(&SecretKey::new(secret), &config)
    }

    fn codec() -> SessionCodec {
        codec_with(SECRET, false)
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn demo_data() -> SessionData {
        SessionData {
            user: Some("demo".into()),
            flashes: vec![Flash::new(FlashLevel::Info, "hello")],
        }
    }

    #[test]
    fn test_signed_session_loads() {
        let codec = codec();
        let token = codec.encode(&demo_data()).unwrap();
        let session = codec.load(&headers_with_cookie(&format!(
            "theme=dark; portal_session={token}; other=1"
        )));
        assert_eq!(session.data(), &demo_data());
        assert!(!session.is_modified());
    }

    #[test]
    fn test_tampered_token_fails_closed() {
        let codec = codec();
        let token = codec.encode(&demo_data()).unwrap();
        let forged_payload = codec
            .encode(&SessionData {
                user: Some("admin".into()),
                flashes: Vec::new(),
            })
            .unwrap();
        let forged_claims = forged_payload.split('.').nth(1).unwrap().to_string();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_claims;
        let tampered = parts.join(".");

        assert!(codec.decode(&tampered).is_err());
        let session = codec.load(&headers_with_cookie(&format!("portal_session={tampered}")));
        assert_eq!(session.user(), None);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let other = codec_with("ffffffffffffffffffffffffffffffff", false);
        let token = other.encode(&demo_data()).unwrap();
        assert!(codec().decode(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let issued_long_ago = now() - 3600 - 7200;
        let token = codec.encode_at(&demo_data(), issued_long_ago).unwrap();
        assert!(codec.decode(&token).is_err());
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let config = SessionConfig {
            ttl_secs: u64::MAX,
            ..SessionConfig::default()
        };
        let codec = SessionCodec::new(&SecretKey::new(SECRET), &config);
        assert!(codec.encode_at(&demo_data(), now()).is_ok());
    }

    #[test]
    fn test_garbage_cookie_invalidates_session() {
        let session = codec().load(&headers_with_cookie("portal_session=not-a-jwt"));
        assert!(session.data().is_empty());
        assert!(session.is_modified());
    }

    #[test]
    fn test_missing_cookie_is_anonymous() {
        let session = codec().load(&HeaderMap::new());
        assert!(session.data().is_empty());
        assert!(!session.is_modified());
    }

    #[test]
    fn test_set_cookie_attributes() {
        let codec = codec_with(SECRET, true);
        let mut session = Session::default();
        session.establish("demo");
        let value = codec.set_cookie(&session).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("portal_session=ey"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.ends_with("; Secure"));
    }

    #[test]
    fn test_empty_session_expires_cookie() {
        let value = codec().set_cookie(&Session::default()).unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "portal_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );
    }

    #[test]
    fn test_read_cookie_ignores_similar_names() {
        let headers = headers_with_cookie("portal_session_old=abc; xportal_session=def");
        assert_eq!(read_cookie(&headers, "portal_session"), None);
    }
}
