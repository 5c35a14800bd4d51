//! HTTP server module.
//!
//! Provides:
//! - The axum router and shared application state
//! - The Basic authentication gate
//! - Upload, health and debug handlers

pub mod auth;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod page;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::validation::validate_bind;
use crate::config::Config;
use crate::error::Result;
use crate::staging::UploadOrchestrator;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<UploadOrchestrator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let orchestrator = UploadOrchestrator::from_config(&config);
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit =
        usize::try_from(state.config.storage.max_upload_bytes).unwrap_or(usize::MAX);

    let protected = Router::new()
        .route("/", get(handlers::home))
        .route("/upload", post(handlers::upload))
        .route("/debug/staging", get(handlers::debug_staging))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let addr = validate_bind(&config.server.bind)?;
    let state = AppState::new(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Staging uploads into {}",
        state.orchestrator.archive_root().display()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
