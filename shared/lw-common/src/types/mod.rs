//! Webhook payload types.

mod event;
mod message;
mod source;

pub use event::{DeliveryContext, Event, EventMode, EventType, Postback, WebhookPayload};
pub use message::{ContentProvider, Message};
pub use source::EventSource;
