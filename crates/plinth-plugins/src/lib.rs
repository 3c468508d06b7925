//! Plugin contract and execution context for plist extraction plugins.
//!
//! A plist plugin receives an already decoded document, the logical name of
//! the file it came from, and a [`ParserContext`]. It reports everything it
//! finds through that context: domain [`Event`]s on one queue and recoverable
//! [`ParseError`]s on another. Plugins never resolve paths, open files, or
//! decode bytes; the harness driving them does that.
//!
//! # Architecture
//!
//! - [`PlistPlugin`] is the single capability every plugin implements. Its
//!   provided [`PlistPlugin::process`] validates the document against the
//!   plugin's declared schema before delegating to
//!   [`PlistPlugin::get_entries`].
//! - [`ParserContext`] binds the event queue, the parse-error queue, and a
//!   read-only [`KnowledgeBase`] for exactly one trial.
//! - [`KnowledgeBase`] merges caller overrides over built-in defaults so every
//!   well-known key resolves to some value.
//!
//! Two reference plugins ship with the crate: [`DefaultPlugin`], which emits
//! an event for every date-valued key, and [`BluetoothPlugin`], which reads
//! the device cache of `com.apple.bluetooth.plist`.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use plinth_plugins::{DefaultPlugin, KnowledgeBase, ParserContext, PlistPlugin};
//! use plinth_queue::{EventQueue, QueueConsumer};
//!
//! let mut app = plist::Dictionary::new();
//! app.insert("LastRunDate".into(), plist::Value::String("2024-03-01T12:30:00Z".into()));
//! let mut root = plist::Dictionary::new();
//! root.insert("MyApp".into(), plist::Value::Dictionary(app));
//! let document = plist::Value::Dictionary(root);
//!
//! let capacity = NonZeroUsize::new(16).expect("non-zero");
//! let events = EventQueue::bounded(capacity);
//! let errors = EventQueue::bounded(capacity);
//! let context = ParserContext::new(events.clone(), errors, KnowledgeBase::new(None));
//!
//! DefaultPlugin.process(&context, "my_app.plist", &document).expect("process");
//! context.close();
//!
//! let mut consumer = QueueConsumer::new(events);
//! assert_eq!(consumer.consume().expect("drain"), 1);
//! ```

pub mod context;
pub mod error;
pub mod event;
pub mod knowledge_base;
pub mod plugin;
pub mod plugins;
pub mod timestamp;

#[cfg(test)]
mod tests;

pub use self::context::ParserContext;
pub use self::error::PluginError;
pub use self::event::{Event, FieldValue, ParseError};
pub use self::knowledge_base::{KnowledgeBase, KnowledgeBaseError, KnowledgeBaseValues, UserAccount};
pub use self::plugin::PlistPlugin;
pub use self::plugins::{BluetoothPlugin, DefaultPlugin};
