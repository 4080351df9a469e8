//! Identity provider abstraction used by the auth routes.

use async_trait::async_trait;
use thiserror::Error;

use super::profile::ProviderProfile;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("request to identity provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token exchange rejected ({status}): {body}")]
    TokenRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("userinfo request rejected ({0})")]
    ProfileRejected(reqwest::StatusCode),

    #[error("identity provider denied the request: {0}")]
    Denied(String),

    #[error("callback carried no authorization code")]
    MissingCode,

    #[error("malformed callback query: {0}")]
    MalformedCallback(String),
}

/// An OAuth2 authorization-code provider.
///
/// Implementations own the provider's endpoints and credentials; the routes
/// only ask for a consent URL and later trade the returned code for a profile.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL of the provider's consent screen for the given callback.
    fn authorization_url(&self, redirect_uri: &str) -> String;

    /// Exchange an authorization code for the user's profile.
    ///
    /// `redirect_uri` must be the same value used to build the consent URL.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderProfile, OAuthError>;
}
