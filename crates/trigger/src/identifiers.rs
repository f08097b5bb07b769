//! Newtype identifiers.
//!
//! Identifiers carried through logs and spans are distinct newtypes so a
//! Pub/Sub message id is never confused with a subscription name, even though
//! both are strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single handler invocation.
///
/// Generated fresh for every delivered event; recorded on the handler span so
/// all log lines from one invocation can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an [`InvocationId`] from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (assigned by the event platform)
// ---------------------------------------------------------------------------

string_id! {
    /// Server-assigned Pub/Sub message id, unique within a topic.
    MessageId
}

string_id! {
    /// Fully-qualified Pub/Sub subscription name
    /// (`projects/<project>/subscriptions/<name>`).
    SubscriptionName
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_reject_empty_values() {
        assert!(MessageId::new("").is_none());
        assert!(SubscriptionName::new(String::new()).is_none());
    }

    #[test]
    fn string_ids_display_their_value() {
        let id = MessageId::new("2070443601311540").unwrap();
        assert_eq!(id.as_str(), "2070443601311540");
        assert_eq!(id.to_string(), "2070443601311540");
    }

    #[test]
    fn invocation_ids_are_unique_and_round_trip_their_uuid() {
        let a = InvocationId::new_random();
        let b = InvocationId::new_random();
        assert_ne!(a, b);
        assert_eq!(InvocationId::from_uuid(a.as_uuid()), a);
    }
}
