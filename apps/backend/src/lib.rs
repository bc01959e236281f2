pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::documents::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DocumentStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = AppState::new();

    if let Some(path) = &config.content_file {
        tracing::info!("Loading study material from {}...", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let loaded = state.documents.load(&name, &content)?;
        if loaded.document.items.is_empty() {
            tracing::warn!(
                "No study items found in {}; expected 古诗/课文段落/日积月累 sections",
                path.display()
            );
        }
    }

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/documents",
            get(routes::documents::list).post(routes::documents::upload),
        )
        .route("/api/documents/:id", get(routes::documents::get))
        .route("/api/documents/:id/items/:index", get(routes::documents::item))
        .route(
            "/api/documents/:id/items/:index/follow",
            post(routes::evaluate::follow),
        )
        .route(
            "/api/documents/:id/items/:index/recite",
            post(routes::evaluate::recite),
        )
        .route("/api/evaluate", post(routes::evaluate::evaluate))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
