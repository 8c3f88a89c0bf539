//! Event Source Types

use serde::{Deserialize, Serialize};

/// Origin of a webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventSource {
    /// One-on-one chat with a user.
    #[serde(rename_all = "camelCase")]
    User { user_id: String },
    /// Group chat. `user_id` is only present when the sender consented.
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    /// Multi-person chat room.
    #[serde(rename_all = "camelCase")]
    Room {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    /// Source type this version does not model.
    #[serde(other)]
    Unknown,
}

impl EventSource {
    /// ID to address a reply to: the group or room for shared chats,
    /// otherwise the user. `None` for unknown source types.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { group_id, .. } => Some(group_id),
            Self::Room { room_id, .. } => Some(room_id),
            Self::Unknown => None,
        }
    }

    /// ID of the user who triggered the event, if known.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
            Self::Unknown => None,
        }
    }
}
