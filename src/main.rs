// =============================================================================
// STAFF PORTAL SERVICE - Main Entry Point
// =============================================================================
// WHAT THIS SERVICE DOES:
// - Validates doctor/staff records against the runtime schema
// - Summarises carts against their declared totals
// - Serves HTML pages wrapped in the shared layout
// - Exposes Prometheus metrics for observability
// =============================================================================

mod config;      // Configuration loading (config.rs)
mod error;       // Error types (error.rs)
mod handlers;    // HTTP request handlers (handlers.rs)
mod layout;      // Page layout wrapper (layout.rs)
mod metrics;     // Prometheus metrics setup (metrics.rs)
mod models;      // Data contracts (models.rs)
mod validation;  // Doctor schema (validation.rs)

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::metrics::setup_metrics;

// -----------------------------------------------------------------------------
// APPLICATION STATE
// -----------------------------------------------------------------------------
// Read-only after startup, shared through Arc.
pub struct AppState {
    pub config: Config,

    /// Prometheus metrics handle
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

/// Route table. Page routes render into the layout; anything unmatched falls
/// through to the layout with an empty outlet.
fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // ----- Health & Metrics -----
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))

        // ----- API -----
        .route("/api/v1/doctors/validate", post(handlers::validate_doctor_handler))
        .route("/api/v1/cart/summary", post(handlers::cart_summary))

        // ----- Pages -----
        .route("/", get(handlers::home_page))
        .fallback(handlers::not_found_page)

        // ----- Middleware Layers -----
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    // RUST_LOG controls log levels, e.g. RUST_LOG=info,staff_portal_service=debug
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,staff_portal_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting Staff Portal Service...");

    let config = Config::from_env()?;
    info!(port = config.port, title = %config.app_title, "Configuration loaded");

    let metrics_handle = setup_metrics()?;
    info!("Prometheus metrics initialized");

    let port = config.port;
    let state = Arc::new(AppState {
        config,
        metrics_handle,
    });

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "Staff Portal Service is listening");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
