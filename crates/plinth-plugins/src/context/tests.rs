//! Unit tests for the parser context.

use std::num::NonZeroUsize;

use plinth_queue::QueueConsumer;
use rstest::{fixture, rstest};
use serde_json::json;
use time::macros::datetime;

use super::*;
use crate::event::{FieldValue, WRITTEN_TIME};
use crate::knowledge_base::KnowledgeBaseValues;

struct Harness {
    events: EventQueue<Event>,
    errors: EventQueue<ParseError>,
    context: ParserContext,
}

fn harness_with(knowledge_base: KnowledgeBase, capacity: usize) -> Harness {
    let capacity = NonZeroUsize::new(capacity).expect("non-zero");
    let events = EventQueue::bounded(capacity);
    let errors = EventQueue::bounded(capacity);
    let context = ParserContext::new(events.clone(), errors.clone(), knowledge_base);
    Harness {
        events,
        errors,
        context,
    }
}

#[fixture]
fn harness() -> Harness {
    harness_with(KnowledgeBase::default(), 8)
}

fn sample_event() -> Event {
    Event::new(datetime!(2024-03-01 12:30:00 UTC), WRITTEN_TIME, "plist:key")
}

fn drain<T>(queue: EventQueue<T>) -> Vec<T> {
    let mut consumer = QueueConsumer::new(queue);
    consumer.consume().expect("queue closed");
    consumer.into_items()
}

#[rstest]
fn publish_event_pushes_unchanged(harness: Harness) {
    harness
        .context
        .publish_event(sample_event())
        .expect("publish");
    harness.context.close();

    let events = drain(harness.events);
    assert_eq!(events, vec![sample_event()]);
}

#[rstest]
fn produce_event_stamps_plugin_and_username(harness: Harness) {
    harness
        .context
        .produce_event("plist_default", sample_event())
        .expect("produce");
    harness.context.close();

    let events = drain(harness.events);
    let event = events.first().expect("one event");
    assert_eq!(event.plugin_name(), "plist_default");
    assert_eq!(event.field("username").and_then(FieldValue::as_str), Some("root"));
    assert!(
        event.field("hostname").is_none(),
        "empty default host name is not stamped"
    );
}

#[test]
fn produce_event_stamps_hostname_override() {
    let mut overrides = KnowledgeBaseValues::new();
    overrides.insert("hostname".into(), json!("mbp.local"));
    let harness = harness_with(KnowledgeBase::new(Some(overrides)), 2);

    let event = sample_event().with_field("username", "dean");
    harness
        .context
        .produce_event("plist_default", event)
        .expect("produce");
    harness.context.close();

    let events = drain(harness.events);
    let stamped = events.first().expect("one event");
    assert_eq!(stamped.field("hostname").and_then(FieldValue::as_str), Some("mbp.local"));
    assert_eq!(
        stamped.field("username").and_then(FieldValue::as_str),
        Some("dean"),
        "plugin supplied values win"
    );
}

#[test]
fn produce_event_propagates_knowledge_base_errors() {
    let mut overrides = KnowledgeBaseValues::new();
    overrides.insert("hostname".into(), json!(["not", "a", "string"]));
    let harness = harness_with(KnowledgeBase::new(Some(overrides)), 2);

    let error = harness
        .context
        .produce_event("plist_default", sample_event())
        .expect_err("malformed host name");
    assert!(matches!(error, PluginError::KnowledgeBase(_)));
    assert!(harness.events.is_empty());
}

#[rstest]
fn parse_errors_travel_on_their_own_queue(harness: Harness) {
    harness
        .context
        .produce_parse_error("plist_default", "nested", "unparsable date")
        .expect("publish");
    harness.context.close();

    assert!(drain(harness.events).is_empty());
    let errors = drain(harness.errors);
    assert_eq!(
        errors,
        vec![ParseError::new("plist_default", "nested", "unparsable date")]
    );
}

#[rstest]
fn publishing_after_close_is_rejected(harness: Harness) {
    harness.context.close();
    harness.context.close();

    let error = harness
        .context
        .publish_event(sample_event())
        .expect_err("closed queue");
    assert_eq!(error, QueueError::Closed { accepted: 0 });
    let error = harness
        .context
        .produce_event("plist_default", sample_event())
        .expect_err("closed queue");
    assert!(matches!(error, PluginError::Queue(QueueError::Closed { .. })));
}

#[test]
fn full_queue_surfaces_capacity() {
    let harness = harness_with(KnowledgeBase::default(), 1);
    harness
        .context
        .publish_event(sample_event())
        .expect("first fits");
    let error = harness
        .context
        .publish_event(sample_event())
        .expect_err("second overflows");
    assert_eq!(error, QueueError::Full { capacity: 1 });
    assert!(harness.errors.is_empty());
}
