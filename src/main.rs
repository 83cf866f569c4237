//! Term graph viewer - a browser-based editor for a small knowledge graph.
//!
//! This is the main entry point for the web server. The dataset is loaded
//! once at startup and lives in memory; edits are offered back as a JSON
//! download or a line-based patch against the as-loaded snapshot.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use termgraph::{graph, handlers, AppState, BIND_ADDR, DATA_PATH};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = Arc::new(AppState::new());

    let app = Router::new()
        // Viewer page
        .route("/", get(handlers::index))
        // Dataset APIs
        .route("/api/graph", get(graph::graph_api))
        .route("/api/dataset", get(handlers::dataset_api))
        .route("/api/terms", get(handlers::terms_api))
        .route("/api/changes", get(handlers::changes_api))
        // Editor mode machine
        .route("/api/mode", post(handlers::mode_api))
        // Term mutations
        .route("/api/term", post(handlers::create_term))
        .route(
            "/api/term/{key}",
            post(handlers::save_term).delete(handlers::delete_term),
        )
        // Export routes
        .route("/export/patch", get(handlers::export_patch))
        .route("/export/json", get(handlers::export_json))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(BIND_ADDR)
        .await
        .expect("Failed to bind address");

    info!("Term graph viewer running at http://{}", BIND_ADDR);
    info!("Dataset file: {}", DATA_PATH);

    axum::serve(listener, app).await.expect("Server error");
}
