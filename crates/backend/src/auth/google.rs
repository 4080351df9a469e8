//! Google OAuth 2.0 authorization-code client.
//!
//! Builds the consent URL for the `profile` and `email` scopes, exchanges the
//! returned code at Google's token endpoint and reads the user's profile from
//! the OpenID userinfo endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::profile::{ProfileValue, ProviderProfile};
use super::provider::{IdentityProvider, OAuthError};

pub const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const SCOPES: [&str; 2] = ["profile", "email"];

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

/// Payload of Google's userinfo endpoint.
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    name: Option<String>,
    picture: Option<String>,
    email: Option<String>,
    email_verified: Option<bool>,
}

impl From<GoogleUserInfo> for ProviderProfile {
    fn from(info: GoogleUserInfo) -> Self {
        ProviderProfile {
            id: info.sub,
            display_name: info.name,
            emails: info
                .email
                .map(|value| ProfileValue {
                    value,
                    verified: info.email_verified,
                })
                .into_iter()
                .collect(),
            photos: info.picture.map(ProfileValue::new).into_iter().collect(),
        }
    }
}

/// Google identity provider.
pub struct GoogleOAuth {
    client_id: String,
    client_secret: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    http: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the code exchange at other token and userinfo endpoints.
    pub fn with_endpoints(
        mut self,
        token_endpoint: impl Into<String>,
        userinfo_endpoint: impl Into<String>,
    ) -> Self {
        self.token_endpoint = token_endpoint.into();
        self.userinfo_endpoint = userinfo_endpoint.into();
        self
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuth {
    fn authorization_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}?\
             response_type=code&\
             client_id={}&\
             redirect_uri={}&\
             scope={}",
            AUTH_ENDPOINT,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(&SCOPES.join(" ")),
        )
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<ProviderProfile, OAuthError> {
        let token_response = self
            .http
            .post(&self.token_endpoint)
            .form(&TokenRequest {
                code,
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                redirect_uri,
                grant_type: "authorization_code",
            })
            .send()
            .await?;

        if !token_response.status().is_success() {
            let status = token_response.status();
            let body = token_response.text().await.unwrap_or_default();
            return Err(OAuthError::TokenRejected { status, body });
        }

        let tokens: GoogleTokenResponse = token_response.json().await?;

        let userinfo_response = self
            .http
            .get(&self.userinfo_endpoint)
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;

        if !userinfo_response.status().is_success() {
            return Err(OAuthError::ProfileRejected(userinfo_response.status()));
        }

        let user_info: GoogleUserInfo = userinfo_response.json().await?;
        tracing::debug!("Fetched Google profile for subject {}", user_info.sub);

        Ok(user_info.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REDIRECT_URI: &str = "http://localhost:3000/auth/google/callback";

    fn client_for(mock_server: &MockServer) -> GoogleOAuth {
        GoogleOAuth::new("client-id", "client-secret").with_endpoints(
            format!("{}/token", mock_server.uri()),
            format!("{}/userinfo", mock_server.uri()),
        )
    }

    async fn mount_token_ok(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.test-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(mock_server)
            .await;
    }

    #[test]
    fn test_authorization_url() {
        let google = GoogleOAuth::new("client 1", "secret");
        let url = google.authorization_url("http://localhost:3000/auth/google/callback");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client%201"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgoogle%2Fcallback"
        ));
        assert!(url.contains("scope=profile%20email"));
        assert!(!url.contains("secret"));
    }

    #[test]
    fn test_userinfo_to_profile() {
        let info: GoogleUserInfo = serde_json::from_value(serde_json::json!({
            "sub": "1234",
            "name": "Grace Hopper",
            "picture": "https://lh3.googleusercontent.com/a/abc",
            "email": "grace@example.com",
            "email_verified": true
        }))
        .unwrap();

        let profile = ProviderProfile::from(info);
        assert_eq!(profile.id, "1234");
        assert_eq!(profile.display_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(
            profile.emails,
            vec![ProfileValue {
                value: "grace@example.com".to_string(),
                verified: Some(true),
            }]
        );
        assert_eq!(profile.photos[0].value, "https://lh3.googleusercontent.com/a/abc");
    }

    #[test]
    fn test_userinfo_without_email_scope() {
        let info: GoogleUserInfo =
            serde_json::from_value(serde_json::json!({ "sub": "99" })).unwrap();

        let profile = ProviderProfile::from(info);
        assert!(profile.emails.is_empty());
        assert!(profile.photos.is_empty());
        assert!(profile.display_name.is_none());
    }

    #[tokio::test]
    async fn test_exchange_code_fetches_profile() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("code=auth-code"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("client_secret=client-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.test-token",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", "Bearer ya29.test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sub": "1234",
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "email_verified": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .exchange_code("auth-code", REDIRECT_URI)
            .await;

        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.id, "1234");
        assert_eq!(profile.display_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(profile.emails[0].value, "grace@example.com");
        assert!(profile.photos.is_empty());
    }

    #[tokio::test]
    async fn test_exchange_code_token_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Bad Request"
            })))
            .mount(&mock_server)
            .await;

        // Userinfo must not be reached
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .exchange_code("stale-code", REDIRECT_URI)
            .await;

        match result {
            Err(OAuthError::TokenRejected { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("Expected TokenRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exchange_code_profile_rejected() {
        let mock_server = MockServer::start().await;
        mount_token_ok(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .exchange_code("auth-code", REDIRECT_URI)
            .await;

        assert!(
            matches!(
                result,
                Err(OAuthError::ProfileRejected(status)) if status == reqwest::StatusCode::UNAUTHORIZED
            ),
            "Expected ProfileRejected(401), got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_exchange_code_token_without_access_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer"
            })))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .exchange_code("auth-code", REDIRECT_URI)
            .await;

        assert!(
            matches!(result, Err(OAuthError::Transport(_))),
            "Expected a decode error, got {:?}",
            result
        );
    }
}
