//! Message Content Types

use serde::{Deserialize, Serialize};

/// Where the binary content of a media message lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentProvider {
    /// Stored on the platform; fetch it through the content API.
    Line,
    /// Hosted by a third party.
    #[serde(rename_all = "camelCase")]
    External {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_content_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview_image_url: Option<String>,
    },
}

/// Message object of a `message` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    #[serde(rename_all = "camelCase")]
    Text {
        id: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quote_token: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        id: String,
        content_provider: ContentProvider,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        id: String,
        #[serde(default)]
        duration: Option<u64>,
        content_provider: ContentProvider,
    },
    #[serde(rename_all = "camelCase")]
    Audio {
        id: String,
        #[serde(default)]
        duration: Option<u64>,
        content_provider: ContentProvider,
    },
    #[serde(rename_all = "camelCase")]
    File {
        id: String,
        file_name: String,
        file_size: u64,
    },
    #[serde(rename_all = "camelCase")]
    Location {
        id: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        address: Option<String>,
        latitude: f64,
        longitude: f64,
    },
    #[serde(rename_all = "camelCase")]
    Sticker {
        id: String,
        package_id: String,
        sticker_id: String,
    },
    /// Message type this version does not model.
    #[serde(other)]
    Unknown,
}

impl Message {
    /// Message ID, if the variant carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Text { id, .. }
            | Self::Image { id, .. }
            | Self::Video { id, .. }
            | Self::Audio { id, .. }
            | Self::File { id, .. }
            | Self::Location { id, .. }
            | Self::Sticker { id, .. } => Some(id),
            Self::Unknown => None,
        }
    }
}
