//! Messages returned by the API, plus deferred deletion.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use crate::builders::CreateMessage;
use crate::error::Result;
use crate::flags::MessageFlags;
use crate::rest::{Method, RequestBody, Transport};
use crate::snowflake::Snowflake;
use crate::types::{Attachment, Embed, MessageRecord, UserRecord};

/// A message returned by the API, bound to the transport that produced it.
#[derive(Clone)]
pub struct Message {
    transport: Arc<dyn Transport>,
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author: Option<UserRecord>,
    pub content: String,
    pub timestamp: Option<String>,
    pub edited_timestamp: Option<String>,
    pub tts: bool,
    pub embeds: Vec<Embed>,
    pub attachments: Vec<Attachment>,
    pub flags: Option<MessageFlags>,
}

impl Message {
    pub(crate) fn from_value(transport: Arc<dyn Transport>, value: Value) -> Result<Self> {
        let record: MessageRecord = serde_json::from_value(value)?;
        Ok(Self::from_record(transport, record))
    }

    pub(crate) fn from_record(transport: Arc<dyn Transport>, record: MessageRecord) -> Self {
        Self {
            transport,
            id: record.id,
            channel_id: record.channel_id,
            author: record.author,
            content: record.content,
            timestamp: record.timestamp,
            edited_timestamp: record.edited_timestamp,
            tts: record.tts,
            embeds: record.embeds,
            attachments: record.attachments,
            flags: record.flags,
        }
    }

    /// Delete this message.
    pub async fn delete(&self) -> Result<()> {
        self.transport
            .query(
                Method::DELETE,
                &format!("/channels/{}/messages/{}", self.channel_id, self.id),
                RequestBody::Empty,
            )
            .await?;
        Ok(())
    }

    /// Delete this message after `delay`, detached from the caller.
    ///
    /// The deletion runs on its own task. Failures are logged and swallowed;
    /// there is no handle to cancel or observe it.
    pub fn delete_after(&self, delay: Duration) {
        let msg = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = msg.delete().await {
                warn!(message_id = %msg.id, "deferred message deletion failed: {e}");
            }
        });
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id)
            .field("channel_id", &self.channel_id)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// Post a message into a channel and schedule its deferred deletion if the
/// builder asked for one.
pub(crate) async fn create(
    transport: Arc<dyn Transport>,
    channel_id: Snowflake,
    message: CreateMessage,
) -> Result<Message> {
    let delete_after = message.delete_after;
    let body = message.into_body();
    let value = transport
        .query(Method::POST, &format!("/channels/{channel_id}/messages"), body)
        .await?;
    let sent = Message::from_value(transport, value)?;
    if let Some(delay) = delete_after {
        sent.delete_after(delay);
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::HavenError;
    use crate::rest::testing::MockTransport;

    fn message_value(id: u64, channel_id: u64) -> Value {
        json!({
            "id": id.to_string(),
            "channel_id": channel_id.to_string(),
            "author": null,
            "content": "hi",
        })
    }

    #[test]
    fn parses_record_fields() {
        let mock: Arc<dyn Transport> = Arc::new(MockTransport::new(vec![]));
        let msg = Message::from_value(mock, message_value(5, 9)).unwrap();
        assert_eq!(msg.id, Snowflake(5));
        assert_eq!(msg.channel_id, Snowflake(9));
        assert_eq!(msg.content, "hi");
        assert!(msg.author.is_none());
        assert!(msg.embeds.is_empty());
    }

    #[tokio::test]
    async fn delete_targets_channel_and_message() {
        let mock = Arc::new(MockTransport::new(vec![Value::Null]));
        let msg =
            Message::from_value(Arc::clone(&mock) as Arc<dyn Transport>, message_value(5, 9))
                .unwrap();
        msg.delete().await.unwrap();

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Method::DELETE);
        assert_eq!(calls[0].1, "/channels/9/messages/5");
    }

    #[tokio::test(start_paused = true)]
    async fn create_schedules_deferred_deletion() {
        let mock = Arc::new(MockTransport::new(vec![message_value(5, 9), Value::Null]));
        let sent = create(
            Arc::clone(&mock) as Arc<dyn Transport>,
            Snowflake(9),
            CreateMessage::new().content("hi").delete_after(Duration::from_secs(30)),
        )
        .await
        .unwrap();
        assert_eq!(sent.id, Snowflake(5));

        // Paused time auto-advances through the 30s sleep once the runtime
        // goes idle.
        tokio::time::sleep(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, Method::DELETE);
        assert_eq!(calls[1].1, "/channels/9/messages/5");
    }

    #[tokio::test(start_paused = true)]
    async fn deferred_deletion_failure_is_swallowed() {
        let mock = Arc::new(MockTransport::failing(HavenError::Api {
            status: 404,
            code: Some("unknown_message".into()),
            message: "Unknown message".into(),
        }));
        let msg =
            Message::from_value(Arc::clone(&mock) as Arc<dyn Transport>, message_value(5, 9))
                .unwrap();

        msg.delete_after(Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(11)).await;
        tokio::task::yield_now().await;

        let calls = mock.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
    }
}
