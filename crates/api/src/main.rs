//! Widgets gateway API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use widgets_common::config::AppConfig;

use widgets_api::routes::create_router;
use widgets_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("widgets_api=debug,widgets_gotify=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting widgets gateway API server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    let port = config.api_port;

    // Build application state
    let state = AppState::new(config)?;
    tracing::info!(gotify = ?state.gotify, "Gotify client ready");

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("Widgets gateway API server stopped.");
    Ok(())
}
