//! The plugin invocation contract.
//!
//! Every plist plugin implements [`PlistPlugin`]. The provided
//! [`PlistPlugin::process`] method enforces the parts of the contract that
//! are common to all plugins (the document must be a dictionary, the logical
//! name must match, required keys must be present) and then hands the
//! top-level dictionary to [`PlistPlugin::get_entries`].

use tracing::debug;

use crate::context::ParserContext;
use crate::error::PluginError;

/// Tracing target for plugin dispatch.
const PLUGIN_TARGET: &str = "plinth_plugins::plugin";

/// A plugin extracting events from one kind of property list.
///
/// Implementations read only from the document and the context's knowledge
/// base, and report only through the context. Malformed values inside an
/// otherwise matching document are published as parse errors; returning an
/// `Err` aborts the trial.
///
/// # Example
///
/// ```
/// use plinth_plugins::{Event, ParserContext, PlistPlugin, PluginError};
/// use plinth_plugins::timestamp::{DateValue, interpret};
///
/// struct LastRunPlugin;
///
/// impl PlistPlugin for LastRunPlugin {
///     fn name(&self) -> &str {
///         "plist_last_run"
///     }
///
///     fn required_keys(&self) -> &[&str] {
///         &["LastRun"]
///     }
///
///     fn get_entries(
///         &self,
///         context: &ParserContext,
///         plist_name: &str,
///         top_level: &plist::Dictionary,
///     ) -> Result<(), PluginError> {
///         let zone = context.knowledge_base().zone()?;
///         let Some(value) = top_level.get("LastRun") else {
///             return Ok(());
///         };
///         match interpret(value, zone) {
///             DateValue::Timestamp(timestamp) => {
///                 let event = Event::new(timestamp, "Last Run Time", "plist:last_run");
///                 context.produce_event(self.name(), event)
///             }
///             _ => Ok(context.produce_parse_error(self.name(), plist_name, "LastRun is not a date")?),
///         }
///     }
/// }
/// ```
pub trait PlistPlugin {
    /// Returns the unique plugin name.
    fn name(&self) -> &str;

    /// Returns a one-line description of the plugin.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the logical file name this plugin accepts, if it is specific
    /// to one file. Matching ignores ASCII case.
    fn plist_name(&self) -> Option<&str> {
        None
    }

    /// Returns the top-level keys a document must contain.
    fn required_keys(&self) -> &[&str] {
        &[]
    }

    /// Extracts events from a validated top-level dictionary.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] for contract violations only; malformed
    /// values are published as parse errors instead.
    fn get_entries(
        &self,
        context: &ParserContext,
        plist_name: &str,
        top_level: &plist::Dictionary,
    ) -> Result<(), PluginError>;

    /// Validates the document against this plugin's schema and extracts its
    /// events.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::WrongPlugin`] if the document is not a
    /// dictionary, the logical name does not match
    /// [`plist_name`](Self::plist_name), or a
    /// [required key](Self::required_keys) is missing. Errors from
    /// [`get_entries`](Self::get_entries) are passed through.
    fn process(
        &self,
        context: &ParserContext,
        plist_name: &str,
        document: &plist::Value,
    ) -> Result<(), PluginError> {
        let Some(top_level) = document.as_dictionary() else {
            return Err(PluginError::wrong_plugin(
                self.name(),
                "top-level object is not a dictionary",
            ));
        };

        if let Some(expected) = self.plist_name() {
            if !expected.eq_ignore_ascii_case(plist_name) {
                return Err(PluginError::wrong_plugin(
                    self.name(),
                    format!("expected plist '{expected}', got '{plist_name}'"),
                ));
            }
        }

        if let Some(missing) = self
            .required_keys()
            .iter()
            .find(|key| !top_level.contains_key(key))
        {
            return Err(PluginError::wrong_plugin(
                self.name(),
                format!("missing required key '{missing}'"),
            ));
        }

        debug!(
            target: PLUGIN_TARGET,
            plugin = self.name(),
            plist = plist_name,
            keys = top_level.len(),
            "processing plist"
        );
        self.get_entries(context, plist_name, top_level)
    }
}
