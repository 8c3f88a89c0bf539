//! Webhook Event Types

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{EventSource, Message};

/// Request body sent by the platform to the webhook URL.
///
/// Generic over the element type so receivers can decode into their own event
/// model; defaults to [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload<E = Event> {
    /// User ID of the bot that should receive the events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Events in delivery order. May be empty (the console "verify" request).
    pub events: Vec<E>,
}

/// Only a JSON object is accepted. A missing or `null` `events` field decodes
/// as no events; unknown fields are ignored.
impl<'de, E: Deserialize<'de>> Deserialize<'de> for WebhookPayload<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PayloadVisitor(PhantomData))
    }
}

struct PayloadVisitor<E>(PhantomData<E>);

impl<'de, E: Deserialize<'de>> Visitor<'de> for PayloadVisitor<E> {
    type Value = WebhookPayload<E>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a webhook payload object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut destination = None;
        let mut events = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "destination" => destination = map.next_value::<Option<String>>()?,
                "events" => events = map.next_value::<Option<Vec<E>>>()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(WebhookPayload {
            destination,
            events: events.unwrap_or_default(),
        })
    }
}

/// Kind of webhook event, taken from the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    /// A message was sent to the bot.
    Message,
    /// A user added the bot as a friend or unblocked it.
    Follow,
    /// A user blocked the bot.
    Unfollow,
    /// The bot joined a group or room.
    Join,
    /// The bot was removed from a group or room.
    Leave,
    /// Users joined a group or room the bot is in.
    MemberJoined,
    /// Users left a group or room the bot is in.
    MemberLeft,
    /// A postback action was triggered.
    Postback,
    /// A user entered the range of a beacon.
    Beacon,
    /// An account link attempt completed.
    AccountLink,
    /// A LINE Things device event.
    Things,
    /// A user unsent a message.
    Unsend,
    /// A user finished watching a video with a tracking ID.
    VideoPlayComplete,
    /// Any type this version does not know about.
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Convert to the wire string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::MemberJoined => "memberJoined",
            Self::MemberLeft => "memberLeft",
            Self::Postback => "postback",
            Self::Beacon => "beacon",
            Self::AccountLink => "accountLink",
            Self::Things => "things",
            Self::Unsend => "unsend",
            Self::VideoPlayComplete => "videoPlayComplete",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel state at the time the event was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// The channel is active and may reply.
    Active,
    /// The channel is waiting; another module holds the reply rights.
    Standby,
}

/// Redelivery metadata attached to every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    /// Whether this event is a redelivery of one that previously failed.
    pub is_redelivery: bool,
}

/// Postback payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Postback {
    /// Data string attached to the postback action.
    pub data: String,
    /// Values picked by datetime pickers and rich menu switches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
}

/// A single webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event type.
    #[serde(rename = "type")]
    pub kind: EventType,
    /// Channel state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<EventMode>,
    /// Time of the event in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Where the event came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    /// Token for replying to this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_token: Option<String>,
    /// Unique event ID (ULID), stable across redeliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_context: Option<DeliveryContext>,
    /// Message content for `message` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Postback content for `postback` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<Postback>,
}

impl Event {
    /// Event time as a UTC timestamp, or `None` if out of range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether the platform marked this delivery as a retry.
    pub fn is_redelivery(&self) -> bool {
        self.delivery_context.is_some_and(|ctx| ctx.is_redelivery)
    }
}
