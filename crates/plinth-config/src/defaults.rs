use std::num::NonZeroUsize;

use crate::logging::LogFormat;
use crate::source::SourceType;

/// Default capacity of each per-trial queue.
///
/// One fixture document rarely yields more than a few hundred events; the
/// bound exists to turn a runaway plugin into a diagnostic.
pub const DEFAULT_QUEUE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(65_536) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Default log filter expression used by the harness.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default queue capacity.
#[must_use]
pub const fn default_queue_capacity() -> NonZeroUsize {
    DEFAULT_QUEUE_CAPACITY
}

/// Default log filter expression used by the harness.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the harness.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default source type for path-based trials.
#[must_use]
pub const fn default_source_type() -> SourceType {
    SourceType::Os
}
