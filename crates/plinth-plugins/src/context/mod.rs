//! Per-trial execution context handed to every plugin invocation.
//!
//! The [`ParserContext`] is the only channel through which a plugin talks to
//! the outside world. It owns the producing ends of the event and parse-error
//! queues plus a [`KnowledgeBase`] snapshot. A fresh context is built for
//! every trial; nothing in it is shared across trials.

use plinth_queue::{EventQueue, QueueError};
use tracing::{debug, warn};

use crate::error::PluginError;
use crate::event::{Event, ParseError};
use crate::knowledge_base::KnowledgeBase;

/// Tracing target for context operations.
const CONTEXT_TARGET: &str = "plinth_plugins::context";

/// Queues and environment facts for one plugin invocation.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use plinth_plugins::{Event, KnowledgeBase, ParserContext};
/// use plinth_queue::EventQueue;
/// use time::macros::datetime;
///
/// let capacity = NonZeroUsize::new(4).expect("non-zero");
/// let events = EventQueue::bounded(capacity);
/// let context = ParserContext::new(
///     events.clone(),
///     EventQueue::bounded(capacity),
///     KnowledgeBase::default(),
/// );
///
/// let event = Event::new(datetime!(2024-03-01 12:30:00 UTC), "Written Time", "plist:key");
/// context.publish_event(event).expect("queue has room");
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug)]
pub struct ParserContext {
    event_queue: EventQueue<Event>,
    parse_error_queue: EventQueue<ParseError>,
    knowledge_base: KnowledgeBase,
}

impl ParserContext {
    /// Binds the given queues and knowledge base into a context.
    #[must_use]
    pub const fn new(
        event_queue: EventQueue<Event>,
        parse_error_queue: EventQueue<ParseError>,
        knowledge_base: KnowledgeBase,
    ) -> Self {
        Self {
            event_queue,
            parse_error_queue,
            knowledge_base,
        }
    }

    /// Returns the read-only knowledge base.
    #[must_use]
    pub const fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Pushes an event onto the event queue unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`QueueError`] raised by the event queue.
    pub fn publish_event(&self, event: Event) -> Result<(), QueueError> {
        self.event_queue.push(event)
    }

    /// Pushes a parse error onto the parse-error queue unchanged.
    ///
    /// # Errors
    ///
    /// Returns the [`QueueError`] raised by the parse-error queue.
    pub fn publish_error(&self, error: ParseError) -> Result<(), QueueError> {
        self.parse_error_queue.push(error)
    }

    /// Stamps an event with its producer and ambient facts, then publishes it.
    ///
    /// The plugin name is always recorded. `hostname` and `username` fields
    /// are filled from the knowledge base unless the plugin already set them
    /// or the knowledge base has no value for them.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::KnowledgeBase`] if the ambient values are
    /// malformed, or [`PluginError::Queue`] if the event queue rejects the
    /// event.
    pub fn produce_event(&self, plugin_name: &str, event: Event) -> Result<(), PluginError> {
        let mut stamped = event.with_plugin_name(plugin_name);

        let hostname = self.knowledge_base.hostname()?;
        if !hostname.is_empty() {
            stamped = stamped.with_default_field("hostname", hostname);
        }
        if let Some(username) = self.knowledge_base.default_username()? {
            stamped = stamped.with_default_field("username", username);
        }

        self.publish_event(stamped)?;
        Ok(())
    }

    /// Builds and publishes a parse error for `plist_name`.
    ///
    /// # Errors
    ///
    /// Returns the [`QueueError`] raised by the parse-error queue.
    pub fn produce_parse_error(
        &self,
        plugin_name: &str,
        plist_name: &str,
        message: impl Into<String>,
    ) -> Result<(), QueueError> {
        let error = ParseError::new(plugin_name, plist_name, message);
        warn!(
            target: CONTEXT_TARGET,
            plugin = plugin_name,
            plist = plist_name,
            message = error.message(),
            "plugin reported a parse error"
        );
        self.publish_error(error)
    }

    /// Closes both queues so consumers can drain to completion.
    ///
    /// Idempotent; the driver calls this again after the plugin returns.
    pub fn close(&self) {
        self.event_queue.close();
        self.parse_error_queue.close();
        debug!(
            target: CONTEXT_TARGET,
            events = self.event_queue.pushed(),
            parse_errors = self.parse_error_queue.pushed(),
            "context queues closed"
        );
    }
}

#[cfg(test)]
mod tests;
