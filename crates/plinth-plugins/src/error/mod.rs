//! Errors that abort a plugin invocation.
//!
//! Problems with individual values inside a well-formed document are not
//! errors at this level; plugins publish them as
//! [`ParseError`](crate::event::ParseError) records and keep going. The
//! variants here are contract violations that make the whole trial
//! meaningless.

use plinth_queue::QueueError;
use thiserror::Error;

use crate::knowledge_base::KnowledgeBaseError;

/// Fatal failures raised by [`PlistPlugin`](crate::plugin::PlistPlugin)
/// implementations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The document does not match the schema the plugin handles.
    #[error("plugin '{plugin}' cannot process this document: {reason}")]
    WrongPlugin {
        /// Plugin name.
        plugin: String,
        /// Which part of the contract failed.
        reason: String,
    },

    /// Publishing to one of the context's queues failed.
    #[error("failed to publish plugin output: {0}")]
    Queue(#[from] QueueError),

    /// A knowledge base value the plugin depends on was unusable.
    #[error("knowledge base lookup failed: {0}")]
    KnowledgeBase(#[from] KnowledgeBaseError),
}

impl PluginError {
    /// Convenience constructor for [`PluginError::WrongPlugin`].
    #[must_use]
    pub fn wrong_plugin(plugin: &str, reason: impl Into<String>) -> Self {
        Self::WrongPlugin {
            plugin: plugin.to_owned(),
            reason: reason.into(),
        }
    }
}
