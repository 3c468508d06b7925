//! Errors that abort a trial.
//!
//! Every variant is fatal: once one is returned the trial produced no
//! outcome. Parse errors reported by a plugin are data and never surface
//! here. Foreign errors are wrapped in `Arc` to keep the enum small and
//! cloneable.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use plinth_plugins::PluginError;
use plinth_queue::QueueError;
use thiserror::Error;

use crate::stage::TrialStage;

/// Errors raised by the harness driver and its collaborators.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The fixture location could not be turned into a readable handle.
    #[error("failed to resolve fixture '{location}': {message}")]
    Resolution {
        /// Location that was requested.
        location: Utf8PathBuf,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying I/O error.
        #[source]
        source: Option<Arc<io::Error>>,
    },

    /// The fixture bytes are not a valid property list.
    #[error("failed to decode fixture '{location}': {message}")]
    Decode {
        /// Location the bytes were read from.
        location: Utf8PathBuf,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying decoder error.
        #[source]
        source: Option<Arc<plist::Error>>,
    },

    /// The fixture decoded to nothing, or to an empty top-level container.
    #[error("fixture '{name}' holds no document")]
    EmptyDocument {
        /// Fixture location or logical document name.
        name: String,
    },

    /// The plugin reported a failure while processing the document.
    #[error("plugin '{plugin}' failed: {source}")]
    Plugin {
        /// Name of the plugin under test.
        plugin: String,
        /// Error returned by the plugin.
        #[source]
        source: PluginError,
    },

    /// A trial queue was used outside its contract while draining.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl HarnessError {
    /// Builds a [`HarnessError::Resolution`] wrapping an I/O error.
    pub(crate) fn resolution_io(location: impl Into<Utf8PathBuf>, error: io::Error) -> Self {
        Self::Resolution {
            location: location.into(),
            message: error.to_string(),
            source: Some(Arc::new(error)),
        }
    }

    /// Builds a [`HarnessError::Resolution`] without an underlying cause.
    pub(crate) fn resolution(
        location: impl Into<Utf8PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Resolution {
            location: location.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns the stage the trial was in when this error ended it.
    #[must_use]
    pub const fn stage(&self) -> TrialStage {
        match self {
            Self::Resolution { .. } => TrialStage::Resolving,
            Self::Decode { .. } | Self::EmptyDocument { .. } => TrialStage::Decoding,
            Self::Plugin { .. } => TrialStage::Invoking,
            Self::Queue(_) => TrialStage::Draining,
        }
    }
}
