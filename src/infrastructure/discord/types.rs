//! Wire types for the Discord REST API (v10 surface the order flow uses).

use serde::{Deserialize, Serialize};

/// `VIEW_CHANNEL` permission bit.
pub const VIEW_CHANNEL: u64 = 1 << 10;
/// `SEND_MESSAGES` permission bit.
pub const SEND_MESSAGES: u64 = 1 << 11;
/// `READ_MESSAGE_HISTORY` permission bit.
pub const READ_MESSAGE_HISTORY: u64 = 1 << 16;

/// Channel type for an ordinary guild text channel.
pub const GUILD_TEXT: u8 = 0;

/// Overwrite target kinds.
pub const OVERWRITE_ROLE: u8 = 0;
pub const OVERWRITE_MEMBER: u8 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Permission overwrite entry. Discord serializes the bitsets as strings.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionOverwrite {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub allow: String,
    pub deny: String,
}

impl PermissionOverwrite {
    pub fn allow(id: impl Into<String>, kind: u8, bits: u64) -> Self {
        PermissionOverwrite {
            id: id.into(),
            kind,
            allow: bits.to_string(),
            deny: "0".to_string(),
        }
    }

    pub fn deny(id: impl Into<String>, kind: u8, bits: u64) -> Self {
        PermissionOverwrite {
            id: id.into(),
            kind,
            allow: "0".to_string(),
            deny: bits.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub parent_id: String,
    pub permission_overwrites: Vec<PermissionOverwrite>,
}

/// Rich embed card attached to the order summary message.
#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// Entry of the `attachments` array inside `payload_json`; `id` indexes the
/// matching `files[id]` multipart part.
#[derive(Debug, Serialize)]
pub struct AttachmentRef {
    pub id: usize,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct CreateMessagePayload {
    pub content: String,
    pub embeds: Vec<Embed>,
    pub attachments: Vec<AttachmentRef>,
}

/// Error body Discord returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub code: Option<u64>,
}
