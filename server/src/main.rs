//! LINE Webhook Server - Main Entry Point

use anyhow::Result;
use tracing::info;

use lw_server::{api, config, dispatch};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lw_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting LINE Webhook Server"
    );

    // Start the event consumer
    let (events_tx, events_rx) = dispatch::channel(config.event_buffer);
    let consumer = dispatch::spawn_event_logger(events_rx);

    // Build application state and router
    let bind_address = config.bind_address.clone();
    let webhook_path = config.webhook_path.clone();
    let state = api::AppState::new(config, events_tx);
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, path = %webhook_path, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // The router (and its sender) is gone; let the consumer drain what is queued
    let handled = consumer.await?;
    info!(handled, "Server shutdown complete");

    Ok(())
}
