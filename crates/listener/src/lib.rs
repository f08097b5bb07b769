//! Composer trigger event source infrastructure.
//!
//! Receives Pub/Sub push deliveries over HTTP and runs [`trigger::trigger_dag`]
//! once per delivery.
//!
//! ## Delivery contract
//!
//! Pub/Sub push subscriptions POST a JSON envelope to the endpoint and treat
//! any non-2xx answer as a failed delivery to be retried. The listener maps:
//!
//! | Outcome | Status | Effect |
//! |---------|--------|--------|
//! | DAG run requested (any Airflow status) | `204` | acknowledged |
//! | Malformed envelope | `400` | retried by the platform until it dead-letters |
//! | [`trigger::TriggerError`] | `500` | redelivered |
//!
//! Redelivery, ordering and dead-lettering belong to the subscription, not to
//! this crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Envelope decoding, HTTP serving and per-delivery
//! deadlines live here. The [`trigger`] crate sees only a
//! [`trigger::PubSubMessage`] and an [`trigger::InvocationContext`].

pub mod config;
pub mod envelope;
pub mod server;

pub use config::ListenerConfig;
pub use envelope::{EnvelopeError, PushEnvelope, PushMessage};
pub use server::{router, serve, AppState};
