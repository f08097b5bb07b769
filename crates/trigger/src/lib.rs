//! Core domain for the Composer DAG trigger.
//!
//! This crate contains the trigger handler, its configuration, the request and
//! response value types, the error taxonomy, the verbose diagnostics, and the
//! port traits that infrastructure crates implement. It decides *what* happens
//! for one delivered event; the `composer` and `listener` crates decide *how*
//! credentials, HTTP, and DNS are supplied.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate performs no network I/O of
//! its own. Every outbound call goes through a trait in [`ports`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`InvocationId`, `MessageId`, etc.) |
//! | [`types`] | Value types (`PubSubMessage`, `TriggerRequest`, `Timestamp`, etc.) |
//! | [`errors`] | Stage-labelled error and retry-policy types |
//! | [`config`] | Per-invocation configuration read from the environment |
//! | [`ports`] | Credential, HTTP, and DNS port traits |
//! | [`context`] | Invocation context and the context dumper |
//! | [`diagnostics`] | Environment and DNS dumpers |
//! | [`handler`] | [`trigger_dag`], the event handler itself |

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod errors;
pub mod handler;
pub mod identifiers;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{parse_verbose, TriggerConfig};
pub use context::{dump_context, EventMetadata, Introspect, InvocationContext};
pub use diagnostics::{dump_dns, dump_environment};
pub use errors::{ClientError, ConfigError, RetryPolicy, TriggerError};
pub use handler::trigger_dag;
pub use identifiers::{InvocationId, MessageId, SubscriptionName};
pub use ports::{ClientProvider, CredentialedHttpClient, HostResolver, HttpResponse};
pub use types::{DagRunConf, PubSubMessage, Timestamp, TriggerOutcome, TriggerRequest};
