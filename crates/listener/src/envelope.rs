//! Pub/Sub push envelope decoding.
//!
//! A push subscription delivers:
//!
//! ```json
//! {
//!   "message": {
//!     "data": "aGVsbG8=",
//!     "attributes": {"key": "value"},
//!     "messageId": "2070443601311540",
//!     "message_id": "2070443601311540",
//!     "publishTime": "2021-02-26T19:13:55.749Z",
//!     "publish_time": "2021-02-26T19:13:55.749Z"
//!   },
//!   "subscription": "projects/myproject/subscriptions/mysubscription"
//! }
//! ```
//!
//! Both camelCase and snake_case spellings are sent; either is accepted.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;
use trigger::{EventMetadata, MessageId, PubSubMessage, SubscriptionName, Timestamp};

/// Event type recorded for push deliveries.
pub const MESSAGE_PUBLISHED: &str = "google.cloud.pubsub.topic.v1.messagePublished";

/// Why a push delivery could not be decoded.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid push envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message data is not valid base64: {0}")]
    Data(#[from] base64::DecodeError),
}

/// The JSON body of a push delivery.
#[derive(Debug, Deserialize)]
pub struct PushEnvelope {
    pub message: PushMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

/// The `message` object of a [`PushEnvelope`].
#[derive(Debug, Deserialize)]
pub struct PushMessage {
    /// Base64-encoded payload. Absent for messages with attributes only.
    #[serde(default)]
    pub data: Option<String>,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, rename = "messageId")]
    message_id: Option<String>,

    #[serde(default, rename = "message_id")]
    message_id_snake: Option<String>,

    #[serde(default, rename = "publishTime")]
    publish_time: Option<String>,

    #[serde(default, rename = "publish_time")]
    publish_time_snake: Option<String>,
}

impl PushMessage {
    pub fn message_id(&self) -> Option<&str> {
        self.message_id
            .as_deref()
            .or(self.message_id_snake.as_deref())
    }

    pub fn publish_time(&self) -> Option<&str> {
        self.publish_time
            .as_deref()
            .or(self.publish_time_snake.as_deref())
    }
}

impl PushEnvelope {
    /// Parses and decodes a push delivery body.
    pub fn decode(body: &[u8]) -> Result<(PubSubMessage, EventMetadata), EnvelopeError> {
        let envelope: PushEnvelope = serde_json::from_slice(body)?;
        envelope.into_parts()
    }

    /// Splits the envelope into the handler's message and the event metadata.
    pub fn into_parts(self) -> Result<(PubSubMessage, EventMetadata), EnvelopeError> {
        let data = match self.message.data.as_deref() {
            Some(encoded) => STANDARD.decode(encoded)?,
            None => Vec::new(),
        };
        let message_id = self.message.message_id().and_then(MessageId::new);
        let publish_time = self.message.publish_time().and_then(Timestamp::parse_rfc3339);

        let event = EventMetadata {
            event_id: message_id.clone(),
            event_type: MESSAGE_PUBLISHED.to_string(),
            resource: self.subscription.and_then(SubscriptionName::new),
            timestamp: publish_time,
        };
        let message = PubSubMessage {
            data,
            message_id,
            publish_time,
            attributes: self.message.attributes,
        };
        Ok((message, event))
    }
}
