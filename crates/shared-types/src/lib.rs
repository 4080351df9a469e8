use serde::{Deserialize, Serialize};

/// Identity source a session was established with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &str {
        match self {
            AuthProvider::Google => "google",
        }
    }
}

/// The logged-in user as carried inside the signed session cookie and
/// reported by `GET /api/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSessionRecord {
    /// Provider-assigned opaque identifier
    pub id: String,
    /// Primary email, `null` when the provider did not share one
    pub email: Option<String>,
    /// Display name, empty when unknown
    pub name: String,
    /// Avatar URL, empty when unknown
    pub picture: String,
    pub provider: AuthProvider,
}

impl UserSessionRecord {
    /// Text shown in the account badge: the email, or the display name when
    /// no email was shared.
    pub fn badge_label(&self) -> &str {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => &self.name,
        }
    }
}

/// Fixed body returned by `GET /api/me` for anonymous requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnauthorizedResponse {
    pub ok: bool,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self { ok: false }
    }
}
