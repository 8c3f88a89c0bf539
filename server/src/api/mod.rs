//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{config::Config, dispatch::EventSender, webhook};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Webhook parser bound to the channel secret
    pub client: webhook::WebhookClient,
    /// Queue feeding the event consumer
    pub events: EventSender,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, events: EventSender) -> Self {
        let client = webhook::WebhookClient::new(config.channel_secret.clone());
        Self {
            config: Arc::new(config),
            client,
            events,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Platform callback
        .route(
            &state.config.webhook_path,
            post(webhook::handlers::receive_webhook),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(DefaultBodyLimit::max(max_body_size))
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
