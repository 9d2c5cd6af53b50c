pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, tts::TtsController};
use crate::infrastructure::config::Config;
use request_id::request_id_middleware;

/// Build the application router
pub fn build_router(tts_controller: Arc<TtsController>) -> Router {
    let tts_routes = Router::new()
        .route("/synthesize", post(TtsController::synthesize))
        .with_state(tts_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(tts_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server for local development and container deployments
pub async fn start_http_server(
    config: Arc<Config>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
