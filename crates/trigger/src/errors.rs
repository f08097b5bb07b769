//! Error and retry-policy types for the trigger handler.
//!
//! [`TriggerError`] is what the handler returns to the event platform. Each
//! variant names the stage that failed and wraps the port-level
//! [`ClientError`] that caused it. There are exactly three failure stages;
//! diagnostic failures never become errors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error type carried as the source of a [`ClientError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether a failed invocation is worth redelivering.
///
/// The handler never retries internally. The policy is reported alongside the
/// failure so the delivering platform (or an operator reading the logs) can
/// tell transient failures from configuration problems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// Redelivery may succeed.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means the
        /// platform's own back-off schedule applies.
        after: Option<Duration>,
    },
    /// Redelivery will fail the same way until someone fixes the environment.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Port-level errors
// ---------------------------------------------------------------------------

/// Failure reported by an infrastructure adapter behind one of the
/// [`crate::ports`] traits.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A failure described only by a message.
    #[error("{0}")]
    Failed(String),

    /// A failure caused by an underlying library or I/O error.
    #[error("{context}: {source}")]
    Caused {
        /// What the adapter was doing when the failure occurred.
        context: String,
        /// The underlying error.
        #[source]
        source: BoxError,
    },
}

impl ClientError {
    /// Creates a [`ClientError`] from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates a [`ClientError`] wrapping an underlying error.
    pub fn with_source(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Caused {
            context: context.into(),
            source: source.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::trigger_dag`].
///
/// Any of these is surfaced to the event platform as a handler failure, which
/// triggers the platform's own redelivery policy.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The ambient credentials could not be resolved into an authorised client.
    #[error("credentials: {0}")]
    Credentials(#[source] ClientError),

    /// The POST could not be sent, or no response arrived before the
    /// invocation deadline.
    #[error("transport: {0}")]
    Transport(#[source] ClientError),

    /// The response arrived but its body could not be read.
    #[error("read body: {0}")]
    ReadBody(#[source] ClientError),
}

impl TriggerError {
    /// Short stage label, used as a structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Credentials(_) => "credentials",
            Self::Transport(_) => "transport",
            Self::ReadBody(_) => "read_body",
        }
    }

    /// Returns the [`RetryPolicy`] for this failure.
    ///
    /// Credential failures come from the hosting environment (missing service
    /// account, unreadable key file) and do not heal on redelivery.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Credentials(_) => RetryPolicy::NonRetryable,
            Self::Transport(_) | Self::ReadBody(_) => RetryPolicy::Retryable { after: None },
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A process-level setting could not be parsed.
///
/// Only produced for settings that have a typed value (ports, timeouts). The
/// trigger settings themselves are free-form strings and never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable was set but its value is not valid for its type.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        /// Environment variable name.
        name: &'static str,
        /// Raw value as read from the environment.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}
