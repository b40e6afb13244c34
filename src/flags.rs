//! Bitflag fields carried on users and messages.
//!
//! The API sends these as plain integers. Unknown bits are preserved so
//! newer platform flags survive a decode/re-encode cycle.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Public account flags exposed on user objects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UserFlags: u64 {
        const STAFF = 1 << 0;
        const BOT = 1 << 1;
        const EMAIL_VERIFIED = 1 << 2;
        const EARLY_SUPPORTER = 1 << 3;
        const PREMIUM_SUPPORTER = 1 << 4;
        const DISABLED = 1 << 5;
        const SUSPENDED = 1 << 6;
    }
}

bitflags! {
    /// Per-message behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MessageFlags: u64 {
        const SUPPRESS_EMBEDS = 1 << 2;
        const EPHEMERAL = 1 << 6;
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl Serialize for UserFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for UserFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u64::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u64::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_integer() {
        let flags = UserFlags::STAFF | UserFlags::EARLY_SUPPORTER;
        assert_eq!(serde_json::to_string(&flags).unwrap(), "9");
    }

    #[test]
    fn deserializes_from_integer() {
        let flags: MessageFlags = serde_json::from_str("64").unwrap();
        assert_eq!(flags, MessageFlags::EPHEMERAL);
    }

    #[test]
    fn retains_unknown_bits() {
        let flags: UserFlags = serde_json::from_str("4294967296").unwrap();
        assert_eq!(flags.bits(), 1 << 32);
        assert_eq!(serde_json::to_string(&flags).unwrap(), "4294967296");
    }

    #[test]
    fn combines_message_flags() {
        let flags = MessageFlags::SUPPRESS_EMBEDS | MessageFlags::SUPPRESS_NOTIFICATIONS;
        assert_eq!(flags.bits(), (1 << 2) | (1 << 12));
    }
}
