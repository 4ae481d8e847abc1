//! TextLens Web Server
//!
//! Axum-based web server for the analysis page and JSON API.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use textlens_client::TextAnalyzer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/analyse", post(routes::api::analyse))
        .layer(cors)
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::analysis_html::index))
        .route("/analyse", post(routes::analysis_html::analyse))
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(analyzer: Arc<dyn TextAnalyzer>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState::new(analyzer));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
