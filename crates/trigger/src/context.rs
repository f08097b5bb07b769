//! Invocation context and the verbose context dumper.
//!
//! Request-scoped values expose their fields explicitly through [`Introspect`]
//! so the dumper can walk them without reaching into private state. A context
//! may wrap another introspectable value (its inner context); the dumper
//! follows that chain until it reaches a value with no fields.

use std::time::Instant;

use tracing::info;

use crate::{InvocationId, MessageId, SubscriptionName, Timestamp};

/// Read-only structural view of a request-scoped value.
pub trait Introspect {
    /// Name shown in the dump header.
    fn type_name(&self) -> &'static str;

    /// Field names and rendered values, in declaration order.
    ///
    /// `None` means the value is not a composite and has nothing to show.
    fn fields(&self) -> Option<Vec<(&'static str, String)>>;

    /// The wrapped context, if this value wraps one.
    fn inner(&self) -> Option<&dyn Introspect> {
        None
    }
}

/// The empty root context.
impl Introspect for () {
    fn type_name(&self) -> &'static str {
        "()"
    }

    fn fields(&self) -> Option<Vec<(&'static str, String)>> {
        None
    }
}

// ---------------------------------------------------------------------------
// Invocation context
// ---------------------------------------------------------------------------

/// Values scoped to one handler invocation.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    invocation_id: InvocationId,
    deadline: Option<Instant>,
    event: Option<EventMetadata>,
}

impl InvocationContext {
    /// Creates a context with a fresh [`InvocationId`], no deadline and no
    /// event metadata.
    pub fn new() -> Self {
        Self {
            invocation_id: InvocationId::new_random(),
            deadline: None,
            event: None,
        }
    }

    /// Binds the invocation to a deadline. The outbound call is abandoned
    /// when it passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attaches the metadata of the delivered event.
    pub fn with_event(mut self, event: EventMetadata) -> Self {
        self.event = Some(event);
        self
    }

    pub fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn event(&self) -> Option<&EventMetadata> {
        self.event.as_ref()
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Introspect for InvocationContext {
    fn type_name(&self) -> &'static str {
        "trigger::InvocationContext"
    }

    fn fields(&self) -> Option<Vec<(&'static str, String)>> {
        let deadline = match self.deadline {
            Some(at) => format!(
                "{:?} remaining",
                at.saturating_duration_since(Instant::now())
            ),
            None => "none".to_string(),
        };
        Some(vec![
            ("invocation_id", self.invocation_id.to_string()),
            ("deadline", deadline),
        ])
    }

    fn inner(&self) -> Option<&dyn Introspect> {
        match &self.event {
            Some(event) => Some(event as &dyn Introspect),
            None => Some(&() as &dyn Introspect),
        }
    }
}

// ---------------------------------------------------------------------------
// Event metadata
// ---------------------------------------------------------------------------

/// Metadata the event platform attached to a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMetadata {
    /// Platform-assigned id of the event (the Pub/Sub message id).
    pub event_id: Option<MessageId>,
    /// Event type, e.g. `google.cloud.pubsub.topic.v1.messagePublished`.
    pub event_type: String,
    /// Resource that emitted the event (the subscription for push deliveries).
    pub resource: Option<SubscriptionName>,
    /// When the event was published.
    pub timestamp: Option<Timestamp>,
}

impl Introspect for EventMetadata {
    fn type_name(&self) -> &'static str {
        "trigger::EventMetadata"
    }

    fn fields(&self) -> Option<Vec<(&'static str, String)>> {
        fn or_unset<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<unset>".to_string())
        }

        Some(vec![
            ("event_id", or_unset(&self.event_id)),
            ("event_type", self.event_type.clone()),
            ("resource", or_unset(&self.resource)),
            ("timestamp", or_unset(&self.timestamp)),
        ])
    }
}

// ---------------------------------------------------------------------------
// Dumper
// ---------------------------------------------------------------------------

/// Logs every field of `value`, following its inner contexts.
///
/// The header line is only emitted for the outermost value (`inner == false`).
/// A value without fields is reported as `Context is Empty`. Returns the lines
/// that were logged.
pub fn dump_context(value: &dyn Introspect, inner: bool) -> Vec<String> {
    let mut lines = Vec::new();
    collect_lines(value, inner, &mut lines);
    for line in &lines {
        info!("{line}");
    }
    lines
}

fn collect_lines(value: &dyn Introspect, inner: bool, lines: &mut Vec<String>) {
    if !inner {
        lines.push(format!(
            "********** Fields for {} **********",
            value.type_name()
        ));
    }

    let Some(fields) = value.fields() else {
        lines.push("Context is Empty".to_string());
        return;
    };

    for (name, rendered) in fields {
        lines.push(format!("  Field Name: {name}"));
        lines.push(format!("  Value: {rendered}"));
    }

    if let Some(next) = value.inner() {
        collect_lines(next, true, lines);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn empty_root_context_is_reported_as_empty() {
        let lines = dump_context(&(), false);
        assert_eq!(
            lines,
            vec![
                "********** Fields for () **********".to_string(),
                "Context is Empty".to_string(),
            ]
        );
    }

    #[test]
    fn context_without_event_recurses_into_empty_root() {
        let ctx = InvocationContext::new();
        let lines = dump_context(&ctx, false);

        assert_eq!(lines[0], "********** Fields for trigger::InvocationContext **********");
        assert_eq!(lines[1], "  Field Name: invocation_id");
        assert_eq!(lines[2], format!("  Value: {}", ctx.invocation_id()));
        assert_eq!(lines[3], "  Field Name: deadline");
        assert_eq!(lines[4], "  Value: none");
        assert_eq!(lines[5], "Context is Empty");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn nested_event_fields_are_dumped_without_a_second_header() {
        let ctx = InvocationContext::new()
            .with_deadline(Instant::now() + Duration::from_secs(60))
            .with_event(EventMetadata {
                event_id: MessageId::new("1234"),
                event_type: "google.cloud.pubsub.topic.v1.messagePublished".to_string(),
                resource: SubscriptionName::new("projects/p/subscriptions/s"),
                timestamp: None,
            });

        let lines = dump_context(&ctx, false);

        assert_eq!(lines.iter().filter(|l| l.starts_with("*****")).count(), 1);
        assert!(lines.contains(&"  Field Name: event_id".to_string()));
        assert!(lines.contains(&"  Value: 1234".to_string()));
        assert!(lines.contains(&"  Value: projects/p/subscriptions/s".to_string()));
        assert!(lines.contains(&"  Value: <unset>".to_string()));
        assert!(lines[4].ends_with("remaining"));
        assert!(!lines.contains(&"Context is Empty".to_string()));
    }

    #[test]
    fn inner_dump_omits_header() {
        let lines = dump_context(&EventMetadata::default(), true);
        assert!(lines[0].starts_with("  Field Name:"));
    }

    #[test]
    fn dumping_does_not_alter_the_context() {
        let ctx = InvocationContext::new().with_event(EventMetadata::default());
        let before = format!("{ctx:?}");
        dump_context(&ctx, false);
        assert_eq!(format!("{ctx:?}"), before);
    }
}
