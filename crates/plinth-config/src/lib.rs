//! Shared configuration for the Plinth fixture harness.
//!
//! [`HarnessConfig`] gathers the few knobs a trial run needs: the capacity of
//! the per-trial queues, the log filter and output format used by telemetry,
//! and the source type assumed when resolving fixture paths. Values come from
//! [`HarnessConfig::default`] or a `serde` document, or are layered by
//! `ortho_config` from a configuration file, `PLINTH_*` environment variables
//! and command line flags via [`HarnessConfig::from_env`] and
//! [`HarnessConfig::from_args`].

mod config;
mod defaults;
mod logging;
mod source;

pub use config::{ConfigError, ENV_PREFIX, HarnessConfig};
pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_QUEUE_CAPACITY, default_log_filter, default_log_filter_string,
    default_log_format, default_queue_capacity, default_source_type,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use source::SourceType;
