//! CDN asset addressing.
//!
//! User avatars, banners and decorations live on the CDN host rather than
//! the API host. An [`Asset`] pairs the raw hash key from the API with the
//! fully resolved URL.

use std::fmt;

use crate::snowflake::Snowflake;

/// Base URL for the Haven CDN.
pub const DEFAULT_CDN: &str = "https://cdn.haven.chat";

/// A resolved CDN asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    url: String,
    key: String,
}

impl Asset {
    pub(crate) fn from_avatar(user_id: Snowflake, key: &str) -> Self {
        let ext = ext_for(key);
        Self {
            url: format!("{DEFAULT_CDN}/avatars/{user_id}/{key}.{ext}"),
            key: key.to_owned(),
        }
    }

    pub(crate) fn from_banner(user_id: Snowflake, key: &str) -> Self {
        let ext = ext_for(key);
        Self {
            url: format!("{DEFAULT_CDN}/banners/{user_id}/{key}.{ext}"),
            key: key.to_owned(),
        }
    }

    pub(crate) fn from_avatar_decoration(key: &str) -> Self {
        Self {
            url: format!("{DEFAULT_CDN}/avatar-decorations/{key}.png"),
            key: key.to_owned(),
        }
    }

    pub(crate) fn from_default_avatar(index: u8) -> Self {
        Self {
            url: format!("{DEFAULT_CDN}/embed/avatars/{index}.png"),
            key: index.to_string(),
        }
    }

    /// Full URL on the CDN.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw hash key as the API sent it.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Animated assets carry an `a_` key prefix and resolve to `.gif`.
    pub fn is_animated(&self) -> bool {
        self.key.starts_with("a_")
    }
}

fn ext_for(key: &str) -> &'static str {
    if key.starts_with("a_") {
        "gif"
    } else {
        "png"
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The stock avatar palette assigned to users without a custom avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultAvatar {
    Indigo,
    Gray,
    Green,
    Orange,
    Red,
    Pink,
}

impl DefaultAvatar {
    const VARIANTS: [Self; 6] = [
        Self::Indigo,
        Self::Gray,
        Self::Green,
        Self::Orange,
        Self::Red,
        Self::Pink,
    ];

    /// Variant assigned to an account id.
    ///
    /// Derived from the id's timestamp segment modulo the palette size, so
    /// the result is stable for a given account.
    pub fn for_id(id: Snowflake) -> Self {
        Self::VARIANTS[((id.0 >> 22) % Self::VARIANTS.len() as u64) as usize]
    }

    /// Position within the palette, as the CDN path expects it.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// CDN asset for this variant.
    pub fn asset(self) -> Asset {
        Asset::from_default_avatar(self.index())
    }
}
