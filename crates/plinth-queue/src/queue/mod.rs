//! The bounded FIFO queue shared between a plugin and its consumer.
//!
//! [`EventQueue`] is a cloneable handle. Every clone refers to the same
//! buffer, which lets the execution context hold the producing end while the
//! consumer holds the draining end without either owning the other.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;

use tracing::debug;

use crate::error::QueueError;

/// Tracing target for queue operations.
const QUEUE_TARGET: &str = "plinth_queue::queue";

struct QueueState<T> {
    items: VecDeque<T>,
    capacity: NonZeroUsize,
    closed: bool,
    pushed: usize,
}

/// Bounded, ordered, single-pass queue with an explicit closed marker.
///
/// Items are observed by [`pop`](Self::pop) in exactly the order they were
/// pushed. Once [`close`](Self::close) has been called no further item may be
/// appended, but whatever is still buffered can be drained.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use plinth_queue::{EventQueue, QueueError};
///
/// let queue = EventQueue::bounded(NonZeroUsize::MIN);
/// queue.push(1_u32).expect("first push fits");
/// assert_eq!(queue.push(2), Err(QueueError::Full { capacity: 1 }));
///
/// queue.close();
/// assert_eq!(queue.pop(), Ok(Some(1)));
/// assert_eq!(queue.pop(), Ok(None));
/// ```
pub struct EventQueue<T> {
    state: Rc<RefCell<QueueState<T>>>,
}

impl<T> EventQueue<T> {
    /// Creates an open queue holding at most `capacity` items.
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            state: Rc::new(RefCell::new(QueueState {
                items: VecDeque::new(),
                capacity,
                closed: false,
                pushed: 0,
            })),
        }
    }

    /// Appends an item to the back of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Closed`] if the queue has been closed, or
    /// [`QueueError::Full`] if it already holds `capacity` items.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(QueueError::Closed {
                accepted: state.pushed,
            });
        }
        if state.items.len() >= state.capacity.get() {
            return Err(QueueError::Full {
                capacity: state.capacity.get(),
            });
        }
        state.items.push_back(item);
        state.pushed += 1;
        Ok(())
    }

    /// Marks the queue as closed. Calling this more than once has no effect.
    pub fn close(&self) {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return;
        }
        state.closed = true;
        debug!(
            target: QUEUE_TARGET,
            accepted = state.pushed,
            buffered = state.items.len(),
            "queue closed"
        );
    }

    /// Removes the next item in FIFO order.
    ///
    /// Returns `Ok(None)` once the queue is closed and fully drained.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NotClosed`] when the queue is empty but still
    /// open. In a synchronous trial no producer can run while the consumer
    /// drains, so waiting would never terminate.
    pub fn pop(&self) -> Result<Option<T>, QueueError> {
        let mut state = self.state.borrow_mut();
        if let Some(item) = state.items.pop_front() {
            return Ok(Some(item));
        }
        if state.closed {
            Ok(None)
        } else {
            Err(QueueError::NotClosed {
                drained: state.pushed,
            })
        }
    }

    /// Returns the number of buffered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    /// Returns whether no items are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    /// Returns whether the queue has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// Returns the maximum number of items the queue can buffer.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.state.borrow().capacity
    }

    /// Returns the total number of items accepted since creation.
    #[must_use]
    pub fn pushed(&self) -> usize {
        self.state.borrow().pushed
    }
}

impl<T> Clone for EventQueue<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for EventQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventQueue")
            .field("len", &state.items.len())
            .field("capacity", &state.capacity)
            .field("closed", &state.closed)
            .field("pushed", &state.pushed)
            .finish()
    }
}
