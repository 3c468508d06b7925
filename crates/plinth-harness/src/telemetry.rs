//! Tracing subscriber set-up for harness runs.
//!
//! Trials run inside `cargo test`, so [`initialise`] writes through libtest's
//! capture writer: log lines are shown for failing tests and swallowed for
//! passing ones. [`subscriber`] builds the same stack over any
//! [`MakeWriter`] for callers that want to inspect what a trial logged.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use plinth_config::{HarnessConfig, LogFormat};
use thiserror::Error;
use tracing::Subscriber;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::fmt::{self, MakeWriter, TestWriter, time::UtcTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

/// Boxed subscriber produced by [`subscriber`].
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Errors raised while building or installing the harness subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter expression does not parse.
    #[error("invalid log filter '{expression}': {source}")]
    Filter {
        /// Expression taken from the configuration.
        expression: String,
        /// Parser diagnostic.
        #[source]
        source: Arc<ParseError>,
    },

    /// Another global subscriber was installed outside [`initialise`].
    #[error("failed to install the harness subscriber: {0}")]
    Install(#[source] Arc<SetGlobalDefaultError>),
}

/// Builds a subscriber honouring the filter and format in `config`, writing
/// formatted events through `writer`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the filter expression is invalid.
///
/// # Examples
///
/// ```rust
/// use plinth_config::HarnessConfig;
/// use plinth_harness::telemetry;
///
/// # fn main() -> Result<(), telemetry::TelemetryError> {
/// let subscriber = telemetry::subscriber(&HarnessConfig::default(), std::io::sink)?;
/// tracing::subscriber::with_default(subscriber, || tracing::info!("discarded"));
/// # Ok(())
/// # }
/// ```
pub fn subscriber<W>(config: &HarnessConfig, writer: W) -> Result<BoxedSubscriber, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|source| {
        TelemetryError::Filter {
            expression: config.log_filter().to_owned(),
            source: Arc::new(source),
        }
    })?;

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339());
    let formatted: Box<dyn Layer<Registry> + Send + Sync> = match config.log_format() {
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    };

    Ok(Box::new(Registry::default().with(formatted).with(filter)))
}

/// Installs the harness subscriber as the global default on first use.
///
/// Every test may call this unconditionally; calls after the first leave the
/// installed subscriber in place, even when `config` differs.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid filter expression and
/// [`TelemetryError::Install`] when a foreign global subscriber already
/// exists.
pub fn initialise(config: &HarnessConfig) -> Result<(), TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            let installed = subscriber(config, TestWriter::default())?;
            tracing::subscriber::set_global_default(installed)
                .map_err(|error| TelemetryError::Install(Arc::new(error)))
        })
        .copied()
}
