//! HTTP server implementation using axum.
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use compliance_rag::Copilot;

use crate::routes;

/// Shared, read-only state for every request.
pub struct AppState {
    pub copilot: Arc<Copilot>,
}

pub fn build_router(copilot: Arc<Copilot>) -> Router {
    let shared = Arc::new(AppState { copilot });
    Router::new()
        .route("/health", get(routes::health))
        .route("/ask", post(routes::ask))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

pub async fn serve(addr: &str, copilot: Arc<Copilot>) -> anyhow::Result<()> {
    let app = build_router(copilot);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("compliance copilot listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
