//! Stockwatch Dashboard - embedded out-of-stock variants page.
//!
//! This binary serves the variants page that runs embedded in the host
//! dashboard.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - Saleor GraphQL API for channels and out-of-stock variants
//! - A single page-loop task owns all page state; handlers only read
//!   snapshots and enqueue intents
//! - App-bridge actions (navigation) go out over a one-way channel to
//!   the hosting frame

#![cfg_attr(not(test), forbid(unsafe_code))]
// The module tree is shared with the library target; not every public
// item is reachable from the binary alone
#![allow(dead_code)]
#![allow(unused_imports)]

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

mod bridge;
mod config;
mod error;
mod page;
mod routes;
mod saleor;
mod state;

use bridge::{AppBridge, AppBridgeAction};
use config::DashboardConfig;
use page::VariantsPage;
use saleor::SaleorClient;
use sentry::integrations::tracing as sentry_tracing;
use state::AppState;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &DashboardConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Consume dispatched bridge actions.
///
/// The hosting frame is attached out of process; this drain keeps every
/// dispatched action visible in the structured log.
async fn drain_bridge(mut actions: mpsc::UnboundedReceiver<AppBridgeAction>) {
    while let Some(action) = actions.recv().await {
        match serde_json::to_string(&action) {
            Ok(message) => tracing::info!(%message, "app bridge action dispatched"),
            Err(error) => tracing::warn!(%error, "failed to serialize bridge action"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = DashboardConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockwatch_dashboard=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Saleor client and app bridge
    let client = SaleorClient::new(&config.saleor);
    let (app_bridge, bridge_actions) = AppBridge::new();
    tokio::spawn(drain_bridge(bridge_actions));
    app_bridge.handshake();

    // Spawn the page loop; it immediately starts fetching channels
    let page = VariantsPage::spawn(client, app_bridge);
    let state = AppState::new(config.clone(), page);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("dashboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
