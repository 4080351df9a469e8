//! Stateless session carried in a signed cookie.
//!
//! The cookie value is an HS256 JWT whose claims are the user record plus
//! issue and expiry timestamps. Nothing is stored server-side; a cookie that
//! is missing, tampered with, signed by another key or expired reads as
//! "no session".

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::UserSessionRecord;
use thiserror::Error;

pub const SESSION_COOKIE_NAME: &str = "session";

/// Lifetime of a session from issuance; not extended on use.
pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to sign session: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    user: UserSessionRecord,
    iat: i64,
    exp: i64,
}

/// Issues, reads and clears the session cookie.
#[derive(Clone)]
pub struct SessionStore {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    secure: bool,
}

impl SessionStore {
    pub fn new(secret: &[u8]) -> Self {
        // Expiry is exact: no clock leeway past SESSION_TTL_HOURS
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            secure: false,
        }
    }

    /// Add the `Secure` attribute to issued cookies.
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sign a session for `user` issued at `issued_at`.
    pub fn encode(
        &self,
        user: &UserSessionRecord,
        issued_at: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let claims = SessionClaims {
            user: user.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify a signed session and return its user.
    pub fn decode(&self, token: &str) -> Option<UserSessionRecord> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => resolve_user(data.claims.user),
            Err(e) => {
                tracing::debug!("Ignoring invalid session cookie: {}", e);
                None
            }
        }
    }

    /// Build the `Set-Cookie` value establishing a session for `user`.
    pub fn save(&self, user: &UserSessionRecord) -> Result<Cookie<'static>, SessionError> {
        let token = self.encode(user, Utc::now())?;

        Ok(Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(cookie::time::Duration::hours(SESSION_TTL_HOURS))
            .build())
    }

    /// Read the session user from the request's cookies, if any.
    pub fn load(&self, headers: &HeaderMap) -> Option<UserSessionRecord> {
        let token = extract_session_cookie(headers)?;
        self.decode(&token)
    }

    /// Build the `Set-Cookie` value that removes the session.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        cookie.make_removal();
        cookie
    }
}

/// Turn a verified session record into the request's user.
///
/// Currently the identity; this is where a server-side lookup would go.
fn resolve_user(user: UserSessionRecord) -> Option<UserSessionRecord> {
    Some(user)
}

fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(cookie_header) = value.to_str() else {
            continue;
        };

        for cookie_str in cookie_header.split(';') {
            if let Ok(cookie) = Cookie::parse(cookie_str.trim()) {
                if cookie.name() == SESSION_COOKIE_NAME && !cookie.value().is_empty() {
                    return Some(cookie.value().to_string());
                }
            }
        }
    }

    None
}
