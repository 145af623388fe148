//! Unified error handling with Sentry integration.
//!
//! Fetch failures never reach this type - they are surfaced to the
//! rendering layer as page state. `AppError` covers what the HTTP
//! surface itself can get wrong: malformed intents and a stopped page
//! loop.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::page::PageClosed;

/// Application-level error type for the dashboard surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// The page loop is no longer running.
    #[error("Page error: {0}")]
    Page(#[from] PageClosed),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Page(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Page(_) => "Internal server error".to_string(),
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
