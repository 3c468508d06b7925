//! Crate-level test helpers and behaviour tests.

use std::num::NonZeroUsize;

use plinth_queue::{EventQueue, QueueConsumer};

use crate::context::ParserContext;
use crate::error::PluginError;
use crate::event::{Event, ParseError};
use crate::knowledge_base::{KnowledgeBase, KnowledgeBaseValues};
use crate::plugin::PlistPlugin;


/// Everything a single plugin invocation produced.
pub(crate) struct PluginRun {
    pub(crate) result: Result<(), PluginError>,
    pub(crate) events: Vec<Event>,
    pub(crate) parse_errors: Vec<ParseError>,
}

/// Runs `plugin` over `document` with fresh queues and drains them.
pub(crate) fn run_plugin<P: PlistPlugin + ?Sized>(
    plugin: &P,
    plist_name: &str,
    document: &plist::Value,
    overrides: Option<KnowledgeBaseValues>,
) -> PluginRun {
    let capacity = NonZeroUsize::new(256).expect("non-zero");
    let events = EventQueue::bounded(capacity);
    let parse_errors = EventQueue::bounded(capacity);
    let context = ParserContext::new(
        events.clone(),
        parse_errors.clone(),
        KnowledgeBase::new(overrides),
    );

    let result = plugin.process(&context, plist_name, document);
    context.close();

    PluginRun {
        result,
        events: drain(events),
        parse_errors: drain(parse_errors),
    }
}

fn drain<T>(queue: EventQueue<T>) -> Vec<T> {
    let mut consumer = QueueConsumer::new(queue);
    consumer.consume().expect("context closed the queue");
    consumer.into_items()
}

/// Builds a dictionary value from key/value pairs.
pub(crate) fn dictionary<const N: usize>(entries: [(&str, plist::Value); N]) -> plist::Value {
    let mut dictionary = plist::Dictionary::new();
    for (key, value) in entries {
        dictionary.insert(key.to_owned(), value);
    }
    plist::Value::Dictionary(dictionary)
}

/// Builds a string value.
pub(crate) fn string(value: &str) -> plist::Value {
    plist::Value::String(value.to_owned())
}

#[test]
fn run_plugin_with_default_plugin_round_trips_one_event() {
    let document = dictionary([(
        "MyApp",
        dictionary([("LastRunDate", string("2024-03-01T12:30:00Z"))]),
    )]);
    let run = run_plugin(&crate::DefaultPlugin, "my_app.plist", &document, None);
    run.result.expect("process");
    assert_eq!(run.events.len(), 1);
    assert!(run.parse_errors.is_empty());
}
