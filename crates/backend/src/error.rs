//! Unified error handling for the HTTP layer.
//!
//! Handlers return [`ApiResult`] and use `?` on component errors; the
//! conversion into a response decides what, if anything, the client learns.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_types::UnauthorizedResponse;
use thiserror::Error;

use crate::auth::SessionError;

/// Error response body for server faults
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session accompanies the request
    #[error("Unauthorized")]
    Unauthorized,

    /// Session could not be issued
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(UnauthorizedResponse::default()),
            )
                .into_response(),
            ApiError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
        .into_response()
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
