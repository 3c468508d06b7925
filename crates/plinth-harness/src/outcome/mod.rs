//! What a successful trial hands back to the test.

use std::cmp::Ordering;

use plinth_plugins::{Event, ParseError};
use plinth_queue::QueueConsumer;

/// The drained output of one trial.
///
/// Events and parse errors are kept in the order the plugin published them.
#[derive(Debug)]
pub struct TrialOutcome {
    events: QueueConsumer<Event>,
    parse_errors: QueueConsumer<ParseError>,
}

impl TrialOutcome {
    /// Wraps two drained consumers.
    #[must_use]
    pub const fn new(
        events: QueueConsumer<Event>,
        parse_errors: QueueConsumer<ParseError>,
    ) -> Self {
        Self {
            events,
            parse_errors,
        }
    }

    /// Events in publication order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        self.events.items()
    }

    /// Parse errors in publication order.
    #[must_use]
    pub fn parse_errors(&self) -> &[ParseError] {
        self.parse_errors.items()
    }

    /// Number of events the plugin published.
    #[must_use]
    pub fn number_of_events(&self) -> usize {
        self.events.len()
    }

    /// Events ordered by timestamp, ties broken by message.
    ///
    /// The sort is stable, so events equal on both keys keep their
    /// publication order.
    #[must_use]
    pub fn sorted_events(&self) -> Vec<&Event> {
        let mut sorted: Vec<&Event> = self.events().iter().collect();
        sorted.sort_by(|left, right| compare_events(left, right));
        sorted
    }

    /// The consumer that drained the event queue.
    #[must_use]
    pub const fn event_consumer(&self) -> &QueueConsumer<Event> {
        &self.events
    }

    /// The consumer that drained the parse-error queue.
    #[must_use]
    pub const fn parse_error_consumer(&self) -> &QueueConsumer<ParseError> {
        &self.parse_errors
    }

    /// Splits the outcome into owned events and parse errors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Event>, Vec<ParseError>) {
        (self.events.into_items(), self.parse_errors.into_items())
    }
}

fn compare_events(left: &Event, right: &Event) -> Ordering {
    left.timestamp()
        .cmp(&right.timestamp())
        .then_with(|| left.message().cmp(&right.message()))
}
