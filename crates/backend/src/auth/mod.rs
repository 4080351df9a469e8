//! Authentication module for Google sign-in with a signed session cookie.
//!
//! This module provides:
//! - The [`IdentityProvider`] seam and its Google implementation
//! - Mapping of provider profiles onto [`shared_types::UserSessionRecord`]
//! - The cookie-backed [`SessionStore`]
//! - HTTP handlers for login, callback, logout and `/api/me`

mod google;
mod handlers;
mod profile;
mod provider;
mod session;

pub use google::GoogleOAuth;
pub use handlers::{auth_callback, auth_login, auth_logout, auth_me, CALLBACK_PATH};
pub(crate) use handlers::request_origin;
pub use profile::{map_profile, ProfileValue, ProviderProfile};
pub use provider::{IdentityProvider, OAuthError};
pub use session::{SessionError, SessionStore, SESSION_COOKIE_NAME, SESSION_TTL_HOURS};
