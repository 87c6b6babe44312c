//! HTTP boundary for the generation pipeline
//!
//! Two POST endpoints mirror the two request kinds, plus a health probe and
//! a static-file fallback serving the front-end bundle. All failures come
//! back as `{ "error": <message> }` JSON.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::GenerateTasksRequest;
pub use state::AppState;

use crate::config::ServerConfig;
use crate::genai::GenerationClient;

/// Build the application router
pub fn router(state: AppState, static_dir: &std::path::Path) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let index = ServeFile::new(static_dir.join("index.html"));
    let static_files = ServeDir::new(static_dir).fallback(index);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/generate-milestones", post(routes::generate_milestones))
        .route("/api/generate-tasks", post(routes::generate_tasks))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, client: Arc<dyn GenerationClient>) -> Result<()> {
    let app = router(AppState { client }, &config.static_dir);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {addr}"))?;

    info!(%addr, "Server running");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
