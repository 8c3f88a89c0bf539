//! LINE Webhook Verification
//!
//! HMAC-SHA256 signature validation of inbound webhook bodies and decoding of
//! the verified payload into platform events.

pub mod client;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod signing;

pub use client::{ChannelSecret, WebhookClient};
pub use error::{ErrorResponse, WebhookError, WebhookResult};
pub use parser::{parse_body, parse_events, parse_payload, parse_request, parse_request_async};
pub use signing::{sign_body, validate_signature, SIGNATURE_HEADER};
