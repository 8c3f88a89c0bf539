//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::env;

use crate::webhook::ChannelSecret;

/// Default request body limit (1 MiB).
const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Default capacity of the event dispatch queue.
const DEFAULT_EVENT_BUFFER: usize = 256;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Channel secret used to verify `X-Line-Signature`
    pub channel_secret: ChannelSecret,

    /// Route the platform posts webhooks to (default: "/callback")
    pub webhook_path: String,

    /// Maximum accepted request body in bytes (default: 1 MiB)
    pub max_body_size: usize,

    /// Capacity of the queue between the receiver and the event consumer
    pub event_buffer: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let channel_secret =
            lookup("LINE_CHANNEL_SECRET").context("LINE_CHANNEL_SECRET must be set")?;
        if channel_secret.is_empty() {
            bail!("LINE_CHANNEL_SECRET must not be empty");
        }

        let webhook_path = lookup("WEBHOOK_PATH").unwrap_or_else(|| "/callback".into());
        if !webhook_path.starts_with('/') {
            bail!("WEBHOOK_PATH must start with '/', got {webhook_path:?}");
        }

        let event_buffer = lookup("EVENT_BUFFER")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EVENT_BUFFER);
        if event_buffer == 0 {
            bail!("EVENT_BUFFER must be greater than zero");
        }

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".into()),
            channel_secret: ChannelSecret::from(channel_secret),
            webhook_path,
            max_body_size: lookup("MAX_BODY_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),
            event_buffer,
        })
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            channel_secret: ChannelSecret::from("test-channel-secret"),
            webhook_path: "/callback".into(),
            max_body_size: 64 * 1024,
            event_buffer: 16,
        }
    }
}
