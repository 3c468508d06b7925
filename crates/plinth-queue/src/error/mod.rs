//! Errors raised when the queue discipline is violated.
//!
//! Every variant indicates a harness or plugin bug rather than bad input
//! data, so callers are expected to abort the trial with the diagnostic.

use thiserror::Error;

/// Violations of the bounded queue contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// An item was pushed after the queue had been closed.
    #[error("queue closed after accepting {accepted} item(s); push rejected")]
    Closed {
        /// Number of items the queue accepted before closing.
        accepted: usize,
    },

    /// An item was pushed while the queue held `capacity` items.
    #[error("queue full at capacity {capacity}; push rejected")]
    Full {
        /// Configured capacity of the queue.
        capacity: usize,
    },

    /// The consumer found the queue empty but never closed.
    #[error("queue drained {drained} item(s) but was never closed by its producer")]
    NotClosed {
        /// Number of items popped before the starvation was detected.
        drained: usize,
    },
}
