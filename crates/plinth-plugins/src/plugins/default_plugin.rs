//! Catch-all plugin emitting one event per date-valued key.

use time::{OffsetDateTime, UtcOffset};
use tracing::debug;

use crate::context::ParserContext;
use crate::error::PluginError;
use crate::event::{Event, WRITTEN_TIME};
use crate::plugin::PlistPlugin;
use crate::timestamp::{DateValue, interpret};

/// Tracing target for the default plugin.
const DEFAULT_TARGET: &str = "plinth_plugins::plugins::default";

/// Data type tag of events produced by [`DefaultPlugin`].
const DATA_TYPE: &str = "plist:key";

/// Deepest dictionary nesting the default plugin descends into.
pub const MAX_RECURSION_DEPTH: usize = 15;

/// Walks a whole document and emits an event for every date it finds.
///
/// Each event carries:
///
/// - `root`: slash-separated path of the dictionary holding the date
///   (`/` for top-level keys),
/// - `key`: the key whose value is the date,
/// - a field named after the key holding the timestamp itself,
///
/// and the message `<root>/<key>`. `root` and `key` take precedence over a
/// plist key of the same name. Arrays are searched too; dates and
/// dictionaries inside an array are attributed to the array's key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPlugin;

impl PlistPlugin for DefaultPlugin {
    fn name(&self) -> &str {
        "plist_default"
    }

    fn description(&self) -> &str {
        "Parser for plist files."
    }

    fn get_entries(
        &self,
        context: &ParserContext,
        plist_name: &str,
        top_level: &plist::Dictionary,
    ) -> Result<(), PluginError> {
        let walker = Walker {
            context,
            plist_name,
            plugin: self.name(),
            zone: context.knowledge_base().zone()?,
        };
        walker.dictionary("", top_level, 0)
    }
}

struct Walker<'a> {
    context: &'a ParserContext,
    plist_name: &'a str,
    plugin: &'a str,
    zone: UtcOffset,
}

impl Walker<'_> {
    fn dictionary(
        &self,
        root: &str,
        dictionary: &plist::Dictionary,
        depth: usize,
    ) -> Result<(), PluginError> {
        if depth > MAX_RECURSION_DEPTH {
            debug!(
                target: DEFAULT_TARGET,
                root,
                "maximum recursion depth reached; not descending"
            );
            return Ok(());
        }
        for (key, value) in dictionary.iter() {
            self.value(root, key, value, depth)?;
        }
        Ok(())
    }

    fn value(
        &self,
        root: &str,
        key: &str,
        value: &plist::Value,
        depth: usize,
    ) -> Result<(), PluginError> {
        match interpret(value, self.zone) {
            DateValue::Timestamp(timestamp) => self.emit(root, key, timestamp),
            DateValue::Malformed(message) => Ok(self.context.produce_parse_error(
                self.plugin,
                self.plist_name,
                format!("{}: {message}", path(root, key)),
            )?),
            DateValue::NotADate => match value {
                plist::Value::Dictionary(nested) => {
                    self.dictionary(&path(root, key), nested, depth + 1)
                }
                plist::Value::Array(items) => {
                    for item in items {
                        self.value(root, key, item, depth + 1)?;
                    }
                    Ok(())
                }
                _ => Ok(()),
            },
        }
    }

    fn emit(&self, root: &str, key: &str, timestamp: OffsetDateTime) -> Result<(), PluginError> {
        let display_root = if root.is_empty() { "/" } else { root };
        let event = Event::new(timestamp, WRITTEN_TIME, DATA_TYPE)
            .with_field(key, timestamp)
            .with_field("root", display_root)
            .with_field("key", key)
            .with_message(path(root, key));
        self.context.produce_event(self.plugin, event)
    }
}

fn path(root: &str, key: &str) -> String {
    format!("{root}/{key}")
}
