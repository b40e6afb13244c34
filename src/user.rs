//! User models: partial references, full profiles and the authenticated
//! account.
//!
//! The three types form strictly widening views of the same resource.
//! [`PartialUser`] knows only an id and can still perform every id-based
//! operation; [`User`] adds the profile snapshot decoded from a server
//! record; [`CurrentUser`] is the token's own account and can edit itself.
//! All of them are immutable snapshots: operations return fresh values
//! parsed from the server's response instead of mutating in place.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde_json::{json, Value};

use crate::asset::{Asset, DefaultAvatar};
use crate::builders::CreateMessage;
use crate::channel::DmChannel;
use crate::color::Color;
use crate::error::Result;
use crate::flags::UserFlags;
use crate::message::{self, Message};
use crate::rest::{Method, RequestBody, Transport};
use crate::snowflake::Snowflake;
use crate::types::UserRecord;

// ── Partial reference ─────────────────────────────────────────────────────────

/// A user known only by id.
///
/// Every operation that needs nothing but the id lives here, so callers can
/// message or fetch a user without a profile round trip first.
#[derive(Clone)]
pub struct PartialUser {
    transport: Arc<dyn Transport>,
    pub id: Snowflake,
}

impl PartialUser {
    pub fn new(transport: Arc<dyn Transport>, id: impl Into<Snowflake>) -> Self {
        Self { transport, id: id.into() }
    }

    /// Chat-markup mention for this user.
    pub fn mention(&self) -> String {
        format!("<@!{}>", self.id)
    }

    /// The stock avatar assigned to this id.
    pub fn default_avatar(&self) -> Asset {
        DefaultAvatar::for_id(self.id).asset()
    }

    /// Open (or reuse) the direct-message channel with this user.
    pub async fn create_dm(&self) -> Result<DmChannel> {
        let value = self
            .transport
            .query(
                Method::POST,
                "/users/@me/channels",
                RequestBody::Json(json!({ "recipient_id": self.id })),
            )
            .await?;
        DmChannel::from_value(Arc::clone(&self.transport), value)
    }

    /// Send a direct message to this user.
    ///
    /// Without an explicit channel id on the builder this first opens the
    /// DM channel, so it can take two round trips.
    pub async fn send(&self, message: CreateMessage) -> Result<Message> {
        let channel_id = match message.channel_id {
            Some(id) => id,
            None => self.create_dm().await?.id,
        };
        message::create(Arc::clone(&self.transport), channel_id, message).await
    }

    /// Fetch the full profile behind this reference.
    pub async fn fetch(&self) -> Result<User> {
        let value = self
            .transport
            .query(Method::GET, &format!("/users/{}", self.id), RequestBody::Empty)
            .await?;
        User::from_value(Arc::clone(&self.transport), value)
    }
}

impl fmt::Debug for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialUser").field("id", &self.id).finish_non_exhaustive()
    }
}

impl PartialEq for PartialUser {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PartialUser {}

// ── Full profile ──────────────────────────────────────────────────────────────

/// A user profile decoded from a server record.
///
/// The API leans on sentinel values for "unset": empty strings for image
/// keys, `0` for colors and flag sets, `"0"` for the legacy discriminator.
/// Decoding normalizes all of those to `None`, so a populated field here is
/// always meaningful.
#[derive(Clone)]
pub struct User {
    base: PartialUser,
    pub username: String,
    pub global_name: Option<String>,
    pub bot: bool,
    pub system: bool,
    pub discriminator: Option<String>,
    pub avatar: Option<Asset>,
    pub banner: Option<Asset>,
    pub avatar_decoration: Option<Asset>,
    pub accent_color: Option<Color>,
    pub banner_color: Option<Color>,
    pub public_flags: Option<UserFlags>,
    /// Clan tag object, schema not guaranteed stable. Passed through verbatim.
    pub clan: Option<Value>,
}

impl User {
    pub(crate) fn from_value(transport: Arc<dyn Transport>, value: Value) -> Result<Self> {
        let record: UserRecord = serde_json::from_value(value)?;
        Ok(Self::from_record(transport, record))
    }

    pub(crate) fn from_record(transport: Arc<dyn Transport>, record: UserRecord) -> Self {
        let id = record.id;
        let avatar = record
            .avatar
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(|k| Asset::from_avatar(id, k));
        let banner = record
            .banner
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(|k| Asset::from_banner(id, k));
        let avatar_decoration = record
            .avatar_decoration
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(Asset::from_avatar_decoration);

        Self {
            base: PartialUser::new(transport, id),
            username: record.username,
            global_name: record.global_name.filter(|s| !s.is_empty()),
            bot: record.bot,
            system: record.system,
            // Bots still carry a real discriminator; "0" is the unset marker.
            discriminator: record.discriminator.filter(|d| !d.is_empty() && d.as_str() != "0"),
            avatar,
            banner,
            avatar_decoration,
            accent_color: record.accent_color.filter(|&c| c != 0).map(Color),
            banner_color: record.banner_color.as_deref().and_then(Color::from_hex),
            public_flags: record.public_flags.filter(|&f| f != 0).map(UserFlags::from_bits_retain),
            clan: record.clan,
        }
    }

    pub fn id(&self) -> Snowflake {
        self.base.id
    }

    /// The name clients show: the global display name when set, otherwise
    /// the username.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    /// The avatar clients show: the custom one when set, otherwise the
    /// stock avatar for this id.
    pub fn display_avatar(&self) -> Asset {
        self.avatar.clone().unwrap_or_else(|| self.base.default_avatar())
    }

    /// Alias for [`User::avatar`].
    pub fn global_avatar(&self) -> Option<&Asset> {
        self.avatar.as_ref()
    }

    /// Legacy `name#discriminator` form, or just the username.
    pub fn tag(&self) -> String {
        match &self.discriminator {
            Some(d) => format!("{}#{d}", self.username),
            None => self.username.clone(),
        }
    }

    pub fn mention(&self) -> String {
        self.base.mention()
    }

    pub fn default_avatar(&self) -> Asset {
        self.base.default_avatar()
    }

    pub async fn create_dm(&self) -> Result<DmChannel> {
        self.base.create_dm().await
    }

    pub async fn send(&self, message: CreateMessage) -> Result<Message> {
        self.base.send(message).await
    }

    /// Re-fetch this profile from the API.
    pub async fn fetch(&self) -> Result<User> {
        self.base.fetch().await
    }

    /// Borrow the id-only view of this user.
    pub fn as_partial(&self) -> &PartialUser {
        &self.base
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.base.id)
            .field("username", &self.username)
            .field("global_name", &self.global_name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.base.id == other.base.id
    }
}

impl Eq for User {}

// ── Authenticated account ─────────────────────────────────────────────────────

/// The account the client is authenticated as.
#[derive(Clone)]
pub struct CurrentUser {
    user: User,
    pub verified: bool,
}

impl CurrentUser {
    pub(crate) fn from_value(transport: Arc<dyn Transport>, value: Value) -> Result<Self> {
        let record: UserRecord = serde_json::from_value(value)?;
        Ok(Self::from_record(transport, record))
    }

    pub(crate) fn from_record(transport: Arc<dyn Transport>, record: UserRecord) -> Self {
        let verified = record.verified.unwrap_or(false);
        Self { user: User::from_record(transport, record), verified }
    }

    /// Full profile of the account.
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn id(&self) -> Snowflake {
        self.user.id()
    }

    pub fn display_name(&self) -> &str {
        self.user.display_name()
    }

    /// Apply a profile edit and return the account as the server now sees
    /// it. The result is parsed from the response body, never patched
    /// locally.
    pub async fn edit(&self, edit: EditProfile) -> Result<CurrentUser> {
        let value = self
            .user
            .base
            .transport
            .query(Method::PATCH, "/users/@me", RequestBody::Json(edit.into_payload()))
            .await?;
        Self::from_value(Arc::clone(&self.user.base.transport), value)
    }
}

impl fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrentUser")
            .field("id", &self.user.base.id)
            .field("username", &self.user.username)
            .field("verified", &self.verified)
            .finish_non_exhaustive()
    }
}

// ── Profile edits ─────────────────────────────────────────────────────────────

/// Tri-state edit field: leave untouched, clear on the server, or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Omit,
    Clear,
    Set(T),
}

/// Partial profile update.
///
/// Untouched fields are omitted from the payload entirely, which is how the
/// API tells "leave alone" apart from "clear". Image bytes are content
/// sniffed and inlined as base64 data URIs.
#[derive(Debug, Clone, Default)]
pub struct EditProfile {
    username: Patch<String>,
    avatar: Patch<Vec<u8>>,
    banner: Patch<Vec<u8>>,
}

impl EditProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, v: impl Into<String>) -> Self {
        self.username = Patch::Set(v.into());
        self
    }

    pub fn clear_username(mut self) -> Self {
        self.username = Patch::Clear;
        self
    }

    pub fn avatar(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.avatar = Patch::Set(bytes.into());
        self
    }

    pub fn clear_avatar(mut self) -> Self {
        self.avatar = Patch::Clear;
        self
    }

    pub fn banner(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.banner = Patch::Set(bytes.into());
        self
    }

    pub fn clear_banner(mut self) -> Self {
        self.banner = Patch::Clear;
        self
    }

    fn into_payload(self) -> Value {
        let mut d = json!({});
        match self.username {
            Patch::Set(name) => d["username"] = json!(name),
            Patch::Clear => d["username"] = Value::Null,
            Patch::Omit => {}
        }
        match self.avatar {
            Patch::Set(bytes) => d["avatar"] = json!(image_data_uri(&bytes)),
            Patch::Clear => d["avatar"] = Value::Null,
            Patch::Omit => {}
        }
        match self.banner {
            Patch::Set(bytes) => d["banner"] = json!(image_data_uri(&bytes)),
            Patch::Clear => d["banner"] = Value::Null,
            Patch::Omit => {}
        }
        d
    }
}

fn image_data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime(bytes), B64.encode(bytes))
}

/// Best-effort sniffing over magic bytes. Unknown formats pass through and
/// the API rejects them server-side.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}
