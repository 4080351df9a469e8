//! Authentication HTTP handlers.

use axum::extract::{rejection::QueryRejection, Query};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared_types::UserSessionRecord;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::profile::map_profile;
use super::provider::OAuthError;

pub const CALLBACK_PATH: &str = "/auth/google/callback";

/// Start Google OAuth login flow.
///
/// Redirects the browser to Google's consent screen. An existing session is
/// left untouched until the callback succeeds.
pub async fn auth_login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let redirect_uri = state.callback_url(&headers);
    let auth_url = state.provider.authorization_url(&redirect_uri);

    found(&auth_url)
}

#[derive(Debug, Deserialize)]
pub struct AuthCallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Handle Google OAuth callback.
///
/// Exchanges the authorization code for the user's profile and stores the
/// mapped record in the session cookie. Every failure of the provider flow,
/// including a query string that does not parse, lands back on the home page
/// without a session.
pub async fn auth_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<AuthCallbackParams>, QueryRejection>,
) -> ApiResult<Response> {
    let redirect_uri = state.callback_url(&headers);

    let outcome = match params {
        Err(rejection) => Err(OAuthError::MalformedCallback(rejection.body_text())),
        Ok(Query(AuthCallbackParams {
            error: Some(error), ..
        })) => Err(OAuthError::Denied(error)),
        Ok(Query(AuthCallbackParams {
            code: Some(code), ..
        })) if !code.is_empty() => state.provider.exchange_code(&code, &redirect_uri).await,
        Ok(_) => Err(OAuthError::MissingCode),
    };

    let profile = match outcome {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Google sign-in failed: {}", e);
            return Ok(found("/"));
        }
    };

    let user = map_profile(&profile);
    let cookie = state.sessions.save(&user)?;

    tracing::info!(
        "Successful {} login for user {}",
        user.provider.as_str(),
        user.id
    );

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, cookie.to_string()),
        ],
    )
        .into_response())
}

/// Get the current user from the session cookie.
pub async fn auth_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<UserSessionRecord>> {
    state
        .sessions
        .load(&headers)
        .map(Json)
        .ok_or(ApiError::Unauthorized)
}

/// Logout - clear the session cookie. Idempotent.
pub async fn auth_logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.sessions.clear().to_string())],
    )
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Origin of the incoming request as seen by the browser, from `Host` and
/// `X-Forwarded-Proto`.
pub(crate) fn request_origin(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?.trim();
    if host.is_empty() {
        return None;
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| *s == "http" || *s == "https")
        .unwrap_or("http");

    Some(format!("{}://{}", scheme, host))
}
