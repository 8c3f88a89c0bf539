//! LINE Webhook Common Library
//!
//! Event model for payloads delivered by the LINE Messaging API. Consumers of
//! the webhook receiver depend on these types; the receiver itself only needs
//! them to be deserializable.

pub mod types;

pub use types::*;
