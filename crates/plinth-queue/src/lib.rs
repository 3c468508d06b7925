//! Bounded single-producer/single-consumer queues for plugin output.
//!
//! A trial in the Plinth harness runs one plugin synchronously. The plugin
//! publishes everything it extracts into an [`EventQueue`], and once the
//! plugin has returned a [`QueueConsumer`] drains that queue into an ordered
//! sequence the calling test can inspect.
//!
//! The queue is deliberately single-threaded: producer and consumer never run
//! at the same time, so the shared buffer is an `Rc<RefCell<_>>` rather than a
//! lock. A full queue or a push after close is a contract violation reported
//! through [`QueueError`]; nothing is ever silently dropped.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use plinth_queue::{EventQueue, QueueConsumer};
//!
//! let capacity = NonZeroUsize::new(8).expect("non-zero capacity");
//! let queue = EventQueue::bounded(capacity);
//! queue.push("first").expect("push");
//! queue.push("second").expect("push");
//! queue.close();
//!
//! let mut consumer = QueueConsumer::new(queue);
//! assert_eq!(consumer.consume().expect("drain"), 2);
//! assert_eq!(consumer.items(), &["first", "second"]);
//! ```

pub mod consumer;
pub mod error;
pub mod queue;

pub use self::consumer::QueueConsumer;
pub use self::error::QueueError;
pub use self::queue::EventQueue;
