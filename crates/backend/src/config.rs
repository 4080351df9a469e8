use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Signing keys shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("PUBLIC_URL must start with http:// or https://, got {0}")]
    InvalidPublicUrl(String),
}

/// Server configuration, read from flags or the environment.
///
/// Built once at startup and shared read-only with every request.
#[derive(Clone, Parser)]
#[command(name = "backend")]
#[command(about = "Landing page server with Google sign-in")]
pub struct Config {
    /// Google OAuth client ID
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: String,

    /// Google OAuth client secret
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub google_client_secret: String,

    /// Key used to sign the session cookie.
    ///
    /// There is no fallback: the server refuses to start without one.
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// Address to listen on
    #[arg(long, env = "LISTEN_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding the landing page and its assets
    #[arg(long, env = "STATIC_DIR", default_value = "crates/frontend/dist")]
    pub static_dir: PathBuf,

    /// Page served for any path that is not a file in the static directory
    #[arg(long, env = "INDEX_FILE", default_value = "index.html")]
    pub index_file: String,

    /// External base URL (e.g. https://example.com) used to build the OAuth
    /// callback URL. Derived from the request's Host header when unset.
    #[arg(long, env = "PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Mark the session cookie `Secure`
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google_client_id.trim().is_empty() {
            return Err(ConfigError::Empty("GOOGLE_CLIENT_ID"));
        }
        if self.google_client_secret.trim().is_empty() {
            return Err(ConfigError::Empty("GOOGLE_CLIENT_SECRET"));
        }
        if self.session_secret.is_empty() {
            return Err(ConfigError::Empty("SESSION_SECRET"));
        }
        if let Some(url) = &self.public_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidPublicUrl(url.clone()));
            }
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }

    pub fn has_weak_secret(&self) -> bool {
        self.session_secret.len() < RECOMMENDED_SECRET_LEN
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("google_client_id", &self.google_client_id)
            .field("google_client_secret", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .field("index_file", &self.index_file)
            .field("public_url", &self.public_url)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish()
    }
}
