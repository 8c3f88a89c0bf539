//! Webhook API Handlers
//!
//! Receives platform callbacks, verifies them and queues the events.

use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::{field, info, instrument, warn, Span};

use super::error::ErrorResponse;
use super::signing::SIGNATURE_HEADER;
use crate::api::AppState;

/// Response for an accepted webhook.
#[derive(Debug, Serialize)]
pub struct WebhookAccepted {
    /// Number of events queued for dispatch.
    pub received: usize,
}

/// POST /callback
///
/// A missing or non-ASCII signature header is verified as an empty signature,
/// which never matches.
#[instrument(skip_all, fields(body_len = field::Empty))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<WebhookAccepted>, Response> {
    let body = body.map_err(body_rejected)?;
    Span::current().record("body_len", body.len());

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let events = state
        .client
        .parse_body(signature, &body)
        .map_err(IntoResponse::into_response)?;

    // Refuse the whole batch up front so a stopped consumer never sees half of it.
    if state.events.is_closed() {
        warn!("Event queue closed, refusing webhook");
        return Err(dispatch_unavailable());
    }

    let received = events.len();
    for event in events {
        // The consumer stopped mid-batch. Queued events stay queued and the
        // platform redelivers the batch, so delivery is at-least-once.
        if state.events.send(event).await.is_err() {
            warn!("Event queue closed mid-batch, dropping webhook");
            return Err(dispatch_unavailable());
        }
    }

    info!(received, "Webhook accepted");
    Ok(Json(WebhookAccepted { received }))
}

fn body_rejected(rejection: BytesRejection) -> Response {
    let status = rejection.status();
    let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "PAYLOAD_TOO_LARGE"
    } else {
        "READ_ERROR"
    };
    warn!(%status, "Failed to read webhook body");

    let body = Json(ErrorResponse {
        error: error.to_string(),
        message: rejection.body_text(),
    });
    (status, body).into_response()
}

fn dispatch_unavailable() -> Response {
    let body = Json(ErrorResponse {
        error: "DISPATCH_UNAVAILABLE".to_string(),
        message: "Event consumer is not running".to_string(),
    });
    (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
}
