//! Fluent builders for outgoing messages and embeds.

use std::time::Duration;

use serde_json::{json, Value};

use crate::color::Color;
use crate::flags::MessageFlags;
use crate::rest::{MultipartUpload, RequestBody, UploadFile};
use crate::snowflake::Snowflake;
use crate::types::{
    AllowedMentions, Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, ResponseType,
};

// ── Message builder ───────────────────────────────────────────────────────────

/// Fluent builder for an outgoing message.
///
/// ```rust
/// use std::time::Duration;
/// use haven_sdk::builders::CreateMessage;
///
/// let message = CreateMessage::new()
///     .content("Hello there")
///     .delete_after(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreateMessage {
    content: Option<String>,
    embeds: Vec<Embed>,
    files: Vec<UploadFile>,
    components: Vec<Value>,
    flags: Option<MessageFlags>,
    allowed_mentions: Option<AllowedMentions>,
    tts: bool,
    response_kind: Option<ResponseType>,
    pub(crate) channel_id: Option<Snowflake>,
    pub(crate) delete_after: Option<Duration>,
}

impl CreateMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, v: impl Into<String>) -> Self {
        self.content = Some(v.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn file(mut self, file: UploadFile) -> Self {
        self.files.push(file);
        self
    }

    /// Attach a raw component row. Component payloads are platform-defined
    /// and passed through verbatim.
    pub fn component(mut self, component: Value) -> Self {
        self.components.push(component);
        self
    }

    pub fn flags(mut self, flags: MessageFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn allowed_mentions(mut self, mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(mentions);
        self
    }

    pub fn tts(mut self, on: bool) -> Self {
        self.tts = on;
        self
    }

    /// Override the response type. Regular channel sends leave this unset.
    pub fn response_kind(mut self, kind: ResponseType) -> Self {
        self.response_kind = Some(kind);
        self
    }

    /// Route the message to a known channel instead of auto-creating a DM.
    pub fn channel_id(mut self, id: impl Into<Snowflake>) -> Self {
        self.channel_id = Some(id.into());
        self
    }

    /// Delete the sent message after `delay`, best effort.
    pub fn delete_after(mut self, delay: Duration) -> Self {
        self.delete_after = Some(delay);
        self
    }

    pub(crate) fn into_body(self) -> RequestBody {
        let mut d = json!({});
        if let Some(c) = self.content {
            d["content"] = json!(c);
        }
        if !self.embeds.is_empty() {
            d["embeds"] = json!(self.embeds);
        }
        if !self.components.is_empty() {
            d["components"] = Value::Array(self.components);
        }
        if let Some(f) = self.flags {
            d["flags"] = json!(f);
        }
        if let Some(m) = self.allowed_mentions {
            d["allowed_mentions"] = json!(m);
        }
        if self.tts {
            d["tts"] = json!(true);
        }
        if let Some(k) = self.response_kind {
            d["type"] = json!(k);
        }

        if self.files.is_empty() {
            return RequestBody::Json(d);
        }

        d["attachments"] = Value::Array(
            self.files
                .iter()
                .enumerate()
                .map(|(i, f)| json!({ "id": i, "filename": f.filename }))
                .collect(),
        );
        RequestBody::Multipart(MultipartUpload { payload_json: d, files: self.files })
    }
}

// ── Embed builder ─────────────────────────────────────────────────────────────

/// Fluent builder for message embeds.
///
/// ```rust
/// use haven_sdk::builders::EmbedBuilder;
///
/// let embed = EmbedBuilder::new()
///     .title("Hello")
///     .description("World")
///     .color(0x7c6af7u32)
///     .build();
/// ```
#[derive(Default)]
pub struct EmbedBuilder {
    inner: Embed,
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.inner.title = Some(v.into());
        self
    }

    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.inner.description = Some(v.into());
        self
    }

    pub fn url(mut self, v: impl Into<String>) -> Self {
        self.inner.url = Some(v.into());
        self
    }

    pub fn color(mut self, v: impl Into<Color>) -> Self {
        self.inner.color = Some(v.into());
        self
    }

    pub fn timestamp(mut self, v: impl Into<String>) -> Self {
        self.inner.timestamp = Some(v.into());
        self
    }

    pub fn footer(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.inner.footer = Some(EmbedFooter { text: text.into(), icon_url });
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.inner.image = Some(EmbedImage { url: url.into(), height: None, width: None });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.inner.thumbnail = Some(EmbedImage { url: url.into(), height: None, width: None });
        self
    }

    pub fn author(
        mut self,
        name: impl Into<String>,
        url: Option<String>,
        icon_url: Option<String>,
    ) -> Self {
        self.inner.author = Some(EmbedAuthor { name: name.into(), url, icon_url });
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.inner.fields.push(EmbedField { name: name.into(), value: value.into(), inline });
        self
    }

    pub fn build(self) -> Embed {
        self.inner
    }
}
