//! Draining a queue into an ordered sequence.

use crate::error::QueueError;
use crate::queue::EventQueue;

/// Drains an [`EventQueue`] to completion and keeps what it popped.
///
/// The consumer never reorders or drops items. [`consume`](Self::consume)
/// stops at the queue's terminal signal, so it always terminates once the
/// producer has closed the queue.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use plinth_queue::{EventQueue, QueueConsumer};
///
/// let queue = EventQueue::bounded(NonZeroUsize::new(2).expect("non-zero"));
/// let mut consumer = QueueConsumer::new(queue.clone());
///
/// queue.push('a').expect("push");
/// queue.close();
///
/// assert_eq!(consumer.consume().expect("drain"), 1);
/// assert_eq!(consumer.into_items(), vec!['a']);
/// ```
#[derive(Debug)]
pub struct QueueConsumer<T> {
    queue: EventQueue<T>,
    items: Vec<T>,
}

impl<T> QueueConsumer<T> {
    /// Creates a consumer over the given queue.
    #[must_use]
    pub const fn new(queue: EventQueue<T>) -> Self {
        Self {
            queue,
            items: Vec::new(),
        }
    }

    /// Pops until the queue signals that it is closed and drained.
    ///
    /// Returns the number of items collected by this call. Items gathered by
    /// earlier calls are kept ahead of them.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NotClosed`] if the queue runs dry without having
    /// been closed. Items popped before the error remain available through
    /// [`items`](Self::items).
    pub fn consume(&mut self) -> Result<usize, QueueError> {
        let before = self.items.len();
        while let Some(item) = self.queue.pop()? {
            self.items.push(item);
        }
        Ok(self.items.len() - before)
    }

    /// Returns the consumed items in queue order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the consumer, returning the collected items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the number of consumed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether nothing has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
