//! The harness driver: one plugin, one document, one outcome.
//!
//! A trial moves through [`TrialStage`]s in order. The driver resolves and
//! decodes the fixture, builds a fresh pair of queues and a fresh
//! [`ParserContext`] around the requested knowledge base, invokes the plugin
//! synchronously, closes the queues, and drains them into a
//! [`TrialOutcome`]. Nothing survives from one trial to the next.

use camino::Utf8Path;
use plinth_config::HarnessConfig;
use plinth_plugins::{KnowledgeBase, KnowledgeBaseValues, ParserContext, PlistPlugin};
use plinth_queue::{EventQueue, QueueConsumer};
use tracing::{debug, info, info_span};

use crate::decoder::{Document, DocumentDecoder, PlistDecoder};
use crate::error::HarnessError;
use crate::outcome::TrialOutcome;
use crate::resolver::{OsResolver, PathResolver};
use crate::stage::TrialStage;

/// Tracing target for driver activity.
const DRIVER_TARGET: &str = "plinth_harness::driver";

/// Runs plugins against fixtures and collects what they publish.
///
/// The resolver and decoder are injectable so tests can serve fixtures from
/// memory or substitute doubles; [`HarnessDriver::new`] wires the
/// file-system resolver and the `plist` decoder.
///
/// # Example
///
/// ```
/// use plinth_config::HarnessConfig;
/// use plinth_harness::HarnessDriver;
/// use plinth_plugins::DefaultPlugin;
///
/// let mut app = plist::Dictionary::new();
/// app.insert("LastRunDate".into(), "2024-03-01T12:30:00Z".into());
/// let mut top = plist::Dictionary::new();
/// top.insert("MyApp".into(), plist::Value::Dictionary(app));
///
/// let driver = HarnessDriver::new(HarnessConfig::default());
/// let outcome = driver
///     .run_from_document(&DefaultPlugin, "my_app.plist", &plist::Value::Dictionary(top), None)
///     .expect("trial succeeds");
/// assert_eq!(outcome.number_of_events(), 1);
/// assert!(outcome.parse_errors().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HarnessDriver<R = OsResolver, D = PlistDecoder> {
    config: HarnessConfig,
    resolver: R,
    decoder: D,
}

impl HarnessDriver {
    /// Creates a driver backed by the host file system.
    #[must_use]
    pub const fn new(config: HarnessConfig) -> Self {
        Self::with_collaborators(config, OsResolver, PlistDecoder)
    }
}

impl Default for HarnessDriver {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl<R, D> HarnessDriver<R, D> {
    /// Creates a driver with explicit resolution and decoding collaborators.
    #[must_use]
    pub const fn with_collaborators(config: HarnessConfig, resolver: R, decoder: D) -> Self {
        Self {
            config,
            resolver,
            decoder,
        }
    }

    /// Returns the configuration trials run with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs `plugin` against an already decoded document.
    ///
    /// `plist_name` is the logical document name the plugin is told about;
    /// `overrides` replace knowledge base defaults key by key.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::EmptyDocument`] if the top-level container is
    /// empty, [`HarnessError::Plugin`] if the plugin fails, and
    /// [`HarnessError::Queue`] if the queues cannot be drained.
    pub fn run_from_document<P>(
        &self,
        plugin: &P,
        plist_name: &str,
        document: &Document,
        overrides: Option<KnowledgeBaseValues>,
    ) -> Result<TrialOutcome, HarnessError>
    where
        P: PlistPlugin + ?Sized,
    {
        let span = info_span!(target: DRIVER_TARGET, "trial", plugin = plugin.name(), plist_name);
        let _entered = span.enter();
        self.invoke(plugin, plist_name, document, overrides)
    }

    fn invoke<P>(
        &self,
        plugin: &P,
        plist_name: &str,
        document: &Document,
        overrides: Option<KnowledgeBaseValues>,
    ) -> Result<TrialOutcome, HarnessError>
    where
        P: PlistPlugin + ?Sized,
    {
        if is_empty_document(document) {
            return Err(HarnessError::EmptyDocument {
                name: plist_name.to_owned(),
            });
        }

        log_stage(TrialStage::Invoking);
        let capacity = self.config.queue_capacity();
        let event_queue = EventQueue::bounded(capacity);
        let parse_error_queue = EventQueue::bounded(capacity);
        let context = ParserContext::new(
            event_queue.clone(),
            parse_error_queue.clone(),
            KnowledgeBase::new(overrides),
        );

        let result = plugin.process(&context, plist_name, document);
        context.close();
        result.map_err(|source| HarnessError::Plugin {
            plugin: plugin.name().to_owned(),
            source,
        })?;

        log_stage(TrialStage::Draining);
        let mut events = QueueConsumer::new(event_queue);
        events.consume()?;
        let mut parse_errors = QueueConsumer::new(parse_error_queue);
        parse_errors.consume()?;

        info!(
            target: DRIVER_TARGET,
            events = events.len(),
            parse_errors = parse_errors.len(),
            "trial complete"
        );
        Ok(TrialOutcome::new(events, parse_errors))
    }
}

impl<R: PathResolver, D: DocumentDecoder> HarnessDriver<R, D> {
    /// Resolves and decodes the fixture at `path`, then runs `plugin`
    /// against it.
    ///
    /// The fixture is resolved with the configured
    /// [`SourceType`](plinth_config::SourceType). The plugin is never invoked
    /// when resolution or decoding fails.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Resolution`] or [`HarnessError::Decode`] for
    /// unusable fixtures, [`HarnessError::EmptyDocument`] when the fixture
    /// holds no document, and otherwise the errors of
    /// [`run_from_document`](Self::run_from_document).
    pub fn run_from_path<P>(
        &self,
        plugin: &P,
        path: &Utf8Path,
        plist_name: &str,
        overrides: Option<KnowledgeBaseValues>,
    ) -> Result<TrialOutcome, HarnessError>
    where
        P: PlistPlugin + ?Sized,
    {
        let span = info_span!(
            target: DRIVER_TARGET,
            "trial",
            plugin = plugin.name(),
            plist_name,
            %path
        );
        let _entered = span.enter();

        log_stage(TrialStage::Resolving);
        let mut handle = self.resolver.resolve(path, self.config.source_type())?;

        log_stage(TrialStage::Decoding);
        let document = self
            .decoder
            .decode(&mut handle)?
            .ok_or_else(|| HarnessError::EmptyDocument {
                name: path.to_string(),
            })?;
        drop(handle);

        self.invoke(plugin, plist_name, &document, overrides)
    }
}

fn log_stage(stage: TrialStage) {
    debug!(target: DRIVER_TARGET, %stage, "entering stage");
}

/// A top-level dictionary or array with no entries carries nothing to parse.
fn is_empty_document(document: &Document) -> bool {
    match document {
        plist::Value::Dictionary(dictionary) => dictionary.is_empty(),
        plist::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
