//! Shared test doubles and behaviour tests for the harness.

use std::cell::Cell;

use plinth_plugins::{DefaultPlugin, Event, ParserContext, PlistPlugin, PluginError};
use time::macros::datetime;


/// XML fixture holding one ISO-8601 date string.
pub(crate) const MY_APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>MyApp</key>
    <dict>
        <key>LastRunDate</key>
        <string>2024-03-01T12:30:00Z</string>
    </dict>
</dict>
</plist>
"#;

/// Wraps [`DefaultPlugin`] and counts how often it was invoked.
#[derive(Debug, Default)]
pub(crate) struct CountingPlugin {
    calls: Cell<usize>,
}

impl CountingPlugin {
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PlistPlugin for CountingPlugin {
    fn name(&self) -> &str {
        DefaultPlugin.name()
    }

    fn get_entries(
        &self,
        context: &ParserContext,
        plist_name: &str,
        top_level: &plist::Dictionary,
    ) -> Result<(), PluginError> {
        self.calls.set(self.calls.get() + 1);
        DefaultPlugin.get_entries(context, plist_name, top_level)
    }
}

/// Publishes a fixed number of events regardless of the document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FloodPlugin {
    pub(crate) events: usize,
}

impl PlistPlugin for FloodPlugin {
    fn name(&self) -> &str {
        "flood"
    }

    fn get_entries(
        &self,
        context: &ParserContext,
        _plist_name: &str,
        _top_level: &plist::Dictionary,
    ) -> Result<(), PluginError> {
        for index in 0..self.events {
            let event = Event::new(datetime!(2024-01-01 00:00:00 UTC), "Written Time", "test:flood")
                .with_message(index.to_string());
            context.produce_event(self.name(), event)?;
        }
        Ok(())
    }
}

/// Reports the knowledge base facts it sees as a single event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KnowledgeReporter;

impl PlistPlugin for KnowledgeReporter {
    fn name(&self) -> &str {
        "knowledge_reporter"
    }

    fn get_entries(
        &self,
        context: &ParserContext,
        _plist_name: &str,
        _top_level: &plist::Dictionary,
    ) -> Result<(), PluginError> {
        let knowledge_base = context.knowledge_base();
        let event = Event::new(datetime!(2024-01-01 00:00:00 UTC), "Written Time", "test:knowledge")
            .with_field("seen_hostname", knowledge_base.hostname()?)
            .with_field("seen_zone_seconds", i64::from(knowledge_base.zone()?.whole_seconds()))
            .with_field("seen_codepage", knowledge_base.codepage()?);
        context.produce_event(self.name(), event)
    }
}

/// Builds a single-key document `{"MyApp": {"LastRunDate": <value>}}`.
pub(crate) fn my_app_document(last_run: &str) -> plist::Value {
    let mut app = plist::Dictionary::new();
    app.insert("LastRunDate".into(), plist::Value::String(last_run.to_owned()));
    let mut top = plist::Dictionary::new();
    top.insert("MyApp".into(), plist::Value::Dictionary(app));
    plist::Value::Dictionary(top)
}
