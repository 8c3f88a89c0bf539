//! Webhook Request Parsing
//!
//! Reads the raw body, checks its signature and only then decodes the JSON
//! envelope. Unauthenticated bodies are never handed to the JSON parser.

use std::io::Read;

use lw_common::{Event, WebhookPayload};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use super::error::{WebhookError, WebhookResult};
use super::signing::validate_signature;

/// Read, verify and decode a webhook request into platform events.
pub fn parse_request<R: Read>(
    secret: &[u8],
    signature: &str,
    reader: R,
) -> WebhookResult<Vec<Event>> {
    parse_events(secret, signature, reader)
}

/// Same as [`parse_request`], decoding each element as `E`.
pub fn parse_events<E, R>(secret: &[u8], signature: &str, mut reader: R) -> WebhookResult<Vec<E>>
where
    E: DeserializeOwned,
    R: Read,
{
    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;

    Ok(parse_payload::<E>(secret, signature, &body)?.events)
}

/// Read the body from an async stream, then verify and decode it.
pub async fn parse_request_async<R>(
    secret: &[u8],
    signature: &str,
    mut reader: R,
) -> WebhookResult<Vec<Event>>
where
    R: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    reader.read_to_end(&mut body).await?;

    parse_body(secret, signature, &body)
}

/// Verify and decode an already-buffered body.
pub fn parse_body(secret: &[u8], signature: &str, body: &[u8]) -> WebhookResult<Vec<Event>> {
    Ok(parse_payload::<Event>(secret, signature, body)?.events)
}

/// Verify and decode an already-buffered body, keeping the whole envelope.
pub fn parse_payload<E: DeserializeOwned>(
    secret: &[u8],
    signature: &str,
    body: &[u8],
) -> WebhookResult<WebhookPayload<E>> {
    if !validate_signature(secret, signature, body) {
        warn!(body_len = body.len(), "Rejected webhook with invalid signature");
        return Err(WebhookError::InvalidSignature);
    }

    let payload: WebhookPayload<E> = serde_json::from_slice(body)?;
    debug!(events = payload.events.len(), "Decoded webhook payload");

    Ok(payload)
}
