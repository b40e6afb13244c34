//! Direct-message channels.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::builders::CreateMessage;
use crate::error::Result;
use crate::message::{self, Message};
use crate::rest::Transport;
use crate::snowflake::Snowflake;
use crate::types::{ChannelRecord, ChannelType, UserRecord};

/// A direct-message channel between the current account and another user.
#[derive(Clone)]
pub struct DmChannel {
    transport: Arc<dyn Transport>,
    pub id: Snowflake,
    pub kind: ChannelType,
    pub name: Option<String>,
    pub recipients: Vec<UserRecord>,
    pub last_message_id: Option<Snowflake>,
}

impl DmChannel {
    pub(crate) fn from_value(transport: Arc<dyn Transport>, value: Value) -> Result<Self> {
        let record: ChannelRecord = serde_json::from_value(value)?;
        Ok(Self::from_record(transport, record))
    }

    pub(crate) fn from_record(transport: Arc<dyn Transport>, record: ChannelRecord) -> Self {
        Self {
            transport,
            id: record.id,
            kind: record.kind,
            name: record.name,
            recipients: record.recipients,
            last_message_id: record.last_message_id,
        }
    }

    /// Send a message into this channel.
    ///
    /// Any channel id already set on the builder is ignored; the message
    /// always lands here.
    pub async fn send(&self, message: CreateMessage) -> Result<Message> {
        message::create(Arc::clone(&self.transport), self.id, message).await
    }
}

impl fmt::Debug for DmChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DmChannel")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rest::testing::MockTransport;
    use crate::rest::Method;

    #[tokio::test]
    async fn send_posts_into_this_channel() {
        let mock = Arc::new(MockTransport::new(vec![json!({
            "id": "77",
            "channel_id": "12",
            "author": null,
            "content": "hey",
        })]));
        let channel = DmChannel::from_value(
            Arc::clone(&mock) as Arc<dyn Transport>,
            json!({ "id": "12", "type": 1 }),
        )
        .unwrap();
        assert_eq!(channel.kind, ChannelType::DIRECT);

        let sent = channel.send(CreateMessage::new().content("hey")).await.unwrap();
        assert_eq!(sent.id, Snowflake(77));

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Method::POST);
        assert_eq!(calls[0].1, "/channels/12/messages");
    }

    #[tokio::test]
    async fn send_ignores_builder_channel_override() {
        let mock = Arc::new(MockTransport::new(vec![json!({
            "id": "78",
            "channel_id": "12",
            "author": null,
        })]));
        let channel = DmChannel::from_value(
            Arc::clone(&mock) as Arc<dyn Transport>,
            json!({ "id": "12", "type": 1 }),
        )
        .unwrap();

        channel
            .send(CreateMessage::new().content("hey").channel_id(999u64))
            .await
            .unwrap();

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls[0].1, "/channels/12/messages");
    }
}
