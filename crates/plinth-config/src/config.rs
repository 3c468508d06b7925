use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{
    default_log_filter_string, default_log_format, default_queue_capacity, default_source_type,
};
use crate::logging::LogFormat;
use crate::source::SourceType;

/// Prefix shared by every environment variable the harness reads.
pub const ENV_PREFIX: &str = "PLINTH_";

/// Program name handed to the loader when no arguments are supplied.
const PROGRAM_NAME: &str = "plinth";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration layer held a value that could not be merged or parsed.
    #[error("failed to load configuration: {0}")]
    Load(Arc<OrthoError>),

    /// The merged log filter was blank.
    #[error("log filter must not be empty")]
    EmptyLogFilter,
}

/// Harness-wide settings shared by every trial.
///
/// Values are layered by `ortho_config`: built-in defaults, then an optional
/// configuration file, then `PLINTH_*` environment variables, then command
/// line flags such as `--queue-capacity`.
///
/// # Example
///
/// ```
/// use plinth_config::{HarnessConfig, LogFormat, SourceType};
///
/// let config = HarnessConfig::default();
/// assert_eq!(config.queue_capacity().get(), 65_536);
/// assert_eq!(config.log_filter(), "info");
/// assert_eq!(config.log_format(), LogFormat::Compact);
/// assert_eq!(config.source_type(), SourceType::Os);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PLINTH")]
pub struct HarnessConfig {
    /// Capacity of each per-trial queue.
    #[serde(default = "default_queue_capacity")]
    #[ortho_config(default = default_queue_capacity())]
    queue_capacity: NonZeroUsize,
    /// Tracing filter expression.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
    /// Source type assumed for path-based trials.
    #[serde(default = "default_source_type")]
    #[ortho_config(default = default_source_type())]
    source_type: SourceType,
}

impl HarnessConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub fn new(
        queue_capacity: NonZeroUsize,
        log_filter: impl Into<String>,
        log_format: LogFormat,
        source_type: SourceType,
    ) -> Self {
        Self {
            queue_capacity,
            log_filter: log_filter.into(),
            log_format,
            source_type,
        }
    }

    /// Loads configuration from defaults, any discovered configuration file
    /// and `PLINTH_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a layer holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args([OsString::from(PROGRAM_NAME)])
    }

    /// Loads configuration with `args` as the command line layer.
    ///
    /// The first argument is the program name, as with `std::env::args_os`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when any layer fails to parse and
    /// [`ConfigError::EmptyLogFilter`] when the merged filter is blank.
    ///
    /// # Example
    ///
    /// ```
    /// use plinth_config::{HarnessConfig, LogFormat};
    ///
    /// let config = HarnessConfig::from_args(["plinth", "--log-format", "json"])
    ///     .expect("valid configuration");
    /// assert_eq!(config.log_format(), LogFormat::Json);
    /// ```
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let config = Self::load_from_iter(args).map_err(ConfigError::Load)?;
        if config.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(config)
    }

    /// Returns a copy with a different queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, queue_capacity: NonZeroUsize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Returns the capacity of each per-trial queue.
    #[must_use]
    pub const fn queue_capacity(&self) -> NonZeroUsize {
        self.queue_capacity
    }

    /// Returns the log filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the source type assumed for path-based trials.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        self.source_type
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            source_type: default_source_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialises_partial_documents_with_defaults() {
        let config: HarnessConfig =
            serde_json::from_str(r#"{ "queue_capacity": 8, "log_format": "json" }"#)
                .expect("partial document parses");

        assert_eq!(config.queue_capacity().get(), 8);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.source_type(), SourceType::Os);
    }

    #[test]
    fn zero_capacity_documents_are_rejected() {
        let result = serde_json::from_str::<HarnessConfig>(r#"{ "queue_capacity": 0 }"#);
        assert!(result.is_err(), "zero capacity must not deserialise");
    }

    #[test]
    fn with_queue_capacity_replaces_only_capacity() {
        let capacity = NonZeroUsize::new(3).expect("non-zero");
        let config = HarnessConfig::default().with_queue_capacity(capacity);
        assert_eq!(config.queue_capacity(), capacity);
        assert_eq!(config.log_filter(), "info");
    }
}
