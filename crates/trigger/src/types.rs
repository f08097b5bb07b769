//! Value types for the trigger handler.
//!
//! [`PubSubMessage`] is what the event platform delivers; [`TriggerRequest`] is
//! what is POSTed to Airflow; [`TriggerOutcome`] is what the handler reports
//! after the remote call.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MessageId;

// ---------------------------------------------------------------------------
// Inbound event
// ---------------------------------------------------------------------------

/// The payload of a Pub/Sub event.
///
/// `data` is opaque: the handler never inspects or mutates it. The metadata
/// fields are populated when the message arrived through a push subscription
/// and are never forwarded to Airflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubSubMessage {
    /// Decoded message payload. May be empty.
    pub data: Vec<u8>,

    /// Server-assigned message id, when known.
    pub message_id: Option<MessageId>,

    /// Time the message was published, when known.
    pub publish_time: Option<Timestamp>,

    /// Publisher-supplied attributes.
    pub attributes: BTreeMap<String, String>,
}

impl PubSubMessage {
    /// Creates a message carrying only a payload.
    pub fn from_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound request
// ---------------------------------------------------------------------------

/// Body of a `POST /api/v1/dags/{dag_id}/dagRuns` call.
///
/// Serialises as `{"conf":{"data":"<base64>"}}`; Airflow hands `conf` to the
/// DAG run unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRequest {
    /// DAG run configuration.
    pub conf: DagRunConf,
}

/// The `conf` object of a [`TriggerRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagRunConf {
    /// Raw event payload, carried as standard padded base64.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl TriggerRequest {
    /// Wraps an event payload without modifying it.
    pub fn wrap(payload: &[u8]) -> Self {
        Self {
            conf: DagRunConf {
                data: payload.to_vec(),
            },
        }
    }

    /// Serialises the request to its JSON body.
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What the remote service answered.
///
/// Returned on every completed exchange, whatever the status code: a `500`
/// from Airflow is still a successful invocation of the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response body, lossily decoded as UTF-8.
    pub body: String,
}

impl TriggerOutcome {
    /// Returns `true` if the remote service answered with a 2xx status.
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 timestamp such as Pub/Sub's `publishTime`.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
