//! Job Queue Adapter (C7): enqueue / dequeue / ack / extend-visibility over
//! an at-least-once message queue (§4.5).

pub mod error;
pub mod in_memory;
pub mod sqs_queue;
pub mod trait_def;

pub use error::{QueueError, Result};
pub use in_memory::InMemoryQueue;
pub use sqs_queue::SqsQueue;
pub use trait_def::{JobQueue, ReceivedMessage};

#[cfg(any(test, feature = "test-util"))]
pub use trait_def::MockJobQueue;
