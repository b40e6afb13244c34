//! Wire-format records matching the Haven REST API (snake_case field names).
//!
//! These are plain serde mirrors of the JSON the platform sends. The richer
//! models in [`crate::user`], [`crate::channel`] and [`crate::message`] are
//! built on top of them and carry the normalization rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Color;
use crate::flags::MessageFlags;
use crate::snowflake::Snowflake;

// ── Users ─────────────────────────────────────────────────────────────────────

/// A user object exactly as the API serializes it.
///
/// Sentinel values the platform uses for "unset" (empty strings, zero
/// colors, zero flag sets, discriminator `"0"`) are preserved here verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Snowflake,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_decoration: Option<String>,
    /// Integer RGB value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    /// Hex string such as `#1abc9c`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
    /// Only present on `/users/@me` responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Clan tag object. Carried opaquely until the platform stabilizes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clan: Option<Value>,
}

// ── Channels ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelType(pub u8);

impl ChannelType {
    pub const TEXT: Self = Self(0);
    pub const DIRECT: Self = Self(1);
    pub const GROUP: Self = Self(3);
}

impl Default for ChannelType {
    fn default() -> Self {
        Self::TEXT
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: Snowflake,
    #[serde(rename = "type", default)]
    pub kind: ChannelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub recipients: Vec<UserRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<Snowflake>,
}

// ── Messages ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(rename = "type", default)]
    pub kind: u8,
    pub author: Option<UserRecord>,
    #[serde(default)]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<String>,
    #[serde(default)]
    pub tts: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Snowflake,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// How the platform should treat a created message.
///
/// Channel sends always use [`ResponseType::CHANNEL_MESSAGE`]; the other
/// values exist for interaction-driven responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseType(pub u8);

impl ResponseType {
    pub const PONG: Self = Self(1);
    pub const CHANNEL_MESSAGE: Self = Self(4);
    pub const DEFERRED_CHANNEL_MESSAGE: Self = Self(5);
    pub const UPDATE_MESSAGE: Self = Self(7);
}

impl Default for ResponseType {
    fn default() -> Self {
        Self::CHANNEL_MESSAGE
    }
}

/// Controls which mentions in a message actually ping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowedMentions {
    #[serde(default)]
    pub parse: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub users: Vec<Snowflake>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub replied_user: bool,
}

impl AllowedMentions {
    /// Suppress every mention in the message.
    pub fn none() -> Self {
        Self::default()
    }

    /// Let user, role and everyone mentions ping.
    pub fn all() -> Self {
        Self {
            parse: vec!["users".into(), "roles".into(), "everyone".into()],
            ..Self::default()
        }
    }
}

// ── Embeds ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<EmbedField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_keeps_sentinels_verbatim() {
        let raw = r#"{
            "id": "123",
            "username": "ally",
            "discriminator": "0",
            "avatar": "",
            "accent_color": 0
        }"#;
        let record: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.discriminator.as_deref(), Some("0"));
        assert_eq!(record.avatar.as_deref(), Some(""));
        assert_eq!(record.accent_color, Some(0));
        assert!(!record.bot);
    }

    #[test]
    fn channel_record_defaults_missing_fields() {
        let record: ChannelRecord = serde_json::from_str(r#"{"id": "9"}"#).unwrap();
        assert_eq!(record.kind, ChannelType::TEXT);
        assert!(record.recipients.is_empty());
        assert!(record.last_message_id.is_none());
    }

    #[test]
    fn message_record_parses_minimal_payload() {
        let raw = r#"{"id": "1", "channel_id": "2", "author": null}"#;
        let record: MessageRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, Snowflake(1));
        assert_eq!(record.content, "");
        assert!(record.author.is_none());
        assert!(record.flags.is_none());
    }

    #[test]
    fn allowed_mentions_none_emits_empty_parse() {
        let value = serde_json::to_value(AllowedMentions::none()).unwrap();
        assert_eq!(value["parse"], serde_json::json!([]));
    }
}
