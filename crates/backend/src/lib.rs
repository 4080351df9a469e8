use std::path::Path;
use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod static_files;

use crate::auth::{GoogleOAuth, IdentityProvider, SessionStore, CALLBACK_PATH};
use crate::config::Config;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub provider: Arc<dyn IdentityProvider>,
    public_url: Option<Arc<str>>,
    default_origin: Arc<str>,
}

impl AppState {
    pub fn new(sessions: SessionStore, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            sessions,
            provider,
            public_url: None,
            default_origin: Arc::from("http://localhost:3000"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let sessions = SessionStore::new(config.session_secret.as_bytes())
            .with_secure_cookies(config.session_cookie_secure);
        let provider = GoogleOAuth::new(&config.google_client_id, &config.google_client_secret);

        let mut state = Self::new(sessions, Arc::new(provider))
            .with_default_origin(format!("http://localhost:{}", config.port));
        if let Some(url) = &config.public_url {
            state = state.with_public_url(url);
        }
        state
    }

    /// Fixed external base URL for the OAuth callback.
    pub fn with_public_url(mut self, url: &str) -> Self {
        self.public_url = Some(Arc::from(url.trim_end_matches('/')));
        self
    }

    /// Origin used when neither a public URL nor a `Host` header is available.
    pub fn with_default_origin(mut self, origin: String) -> Self {
        self.default_origin = Arc::from(origin);
        self
    }

    /// Absolute OAuth callback URL for a request.
    pub fn callback_url(&self, headers: &HeaderMap) -> String {
        let origin = match &self.public_url {
            Some(url) => url.to_string(),
            None => auth::request_origin(headers)
                .unwrap_or_else(|| self.default_origin.to_string()),
        };
        format!("{}{}", origin, CALLBACK_PATH)
    }
}

/// Build the application router.
///
/// When `static_dir` exists, unmatched paths are served from it with
/// `index_path` as the fallback page.
pub fn build_router(state: AppState, static_dir: &Path, index_path: &Path) -> Router {
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/auth/google", get(auth::auth_login))
        .route(CALLBACK_PATH, get(auth::auth_callback))
        .route("/auth/logout", post(auth::auth_logout))
        .route("/api/me", get(auth::auth_me));

    let app = if static_dir.exists() {
        tracing::info!("Serving static files from {}", static_dir.display());
        app.fallback_service(static_files::landing_page_service(static_dir, index_path))
    } else {
        tracing::warn!(
            "Static directory not found at {}, serving API only",
            static_dir.display()
        );
        app
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}
