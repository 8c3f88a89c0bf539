//! Channel-bound Webhook Client
//!
//! Binds a channel secret once so request handlers only pass the signature
//! and body.

use std::fmt;
use std::io::Read;

use lw_common::Event;
use tokio::io::AsyncRead;
use zeroize::Zeroizing;

use super::error::WebhookResult;
use super::{parser, signing};

/// Shared secret used to sign webhook bodies.
///
/// Zeroized on drop. `Debug` never prints the key material.
#[derive(Clone)]
pub struct ChannelSecret(Zeroizing<Vec<u8>>);

impl ChannelSecret {
    /// Wrap raw key bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Key bytes for signing and verification.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ChannelSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChannelSecret([REDACTED])")
    }
}

impl From<String> for ChannelSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for ChannelSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

/// Webhook parser with the channel secret bound.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    channel_secret: ChannelSecret,
}

impl WebhookClient {
    /// Create a client for the given channel.
    pub fn new(channel_secret: impl Into<ChannelSecret>) -> Self {
        Self {
            channel_secret: channel_secret.into(),
        }
    }

    /// See [`parser::parse_request`].
    pub fn parse_request<R: Read>(&self, signature: &str, reader: R) -> WebhookResult<Vec<Event>> {
        parser::parse_request(self.channel_secret.expose(), signature, reader)
    }

    /// See [`parser::parse_request_async`].
    pub async fn parse_request_async<R>(
        &self,
        signature: &str,
        reader: R,
    ) -> WebhookResult<Vec<Event>>
    where
        R: AsyncRead + Unpin,
    {
        parser::parse_request_async(self.channel_secret.expose(), signature, reader).await
    }

    /// See [`parser::parse_body`].
    pub fn parse_body(&self, signature: &str, body: &[u8]) -> WebhookResult<Vec<Event>> {
        parser::parse_body(self.channel_secret.expose(), signature, body)
    }

    /// Check a signature without decoding the body.
    pub fn validate_signature(&self, signature: &str, body: &[u8]) -> bool {
        signing::validate_signature(self.channel_secret.expose(), signature, body)
    }
}
