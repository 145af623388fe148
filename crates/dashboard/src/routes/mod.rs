//! HTTP route handlers for the dashboard surface.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Variants page
//! GET  /app/variants           - Out-of-stock variants for the selected channel
//! POST /app/variants/channel   - Select a channel
//! POST /app/variants/edit      - Open a variant in the host's editor
//! ```

pub mod variants;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/app/variants", get(variants::show))
        .route("/app/variants/channel", post(variants::select_channel))
        .route("/app/variants/edit", post(variants::edit_variant))
}
