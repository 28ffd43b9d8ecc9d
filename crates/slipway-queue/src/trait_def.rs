use async_trait::async_trait;
use slipway_core::JobMessage;
use std::time::Duration;

use crate::error::Result;

/// A message handed back by [`JobQueue::receive`]. The receipt handle is
/// opaque to callers; it is only ever passed back into `delete` or
/// `extend_visibility` on the same queue instance.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub receipt_handle: String,
    /// `None` when the body failed to decode as a `JobMessage` — callers
    /// must still `delete` this receipt handle (§4.5: ack and drop).
    pub job: std::result::Result<JobMessage, String>,
}

/// Enqueue / dequeue / ack / extend-visibility over an at-least-once
/// message queue (C7, §4.5). The production implementation is
/// [`crate::sqs_queue::SqsQueue`]; [`crate::in_memory::InMemoryQueue`] backs
/// both local-mode deploys and tests.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: &JobMessage) -> Result<()>;

    /// Long-polled receive, up to `max_messages` messages, waiting up to
    /// `wait_time` for at least one to arrive.
    async fn receive(&self, max_messages: usize, wait_time: Duration) -> Result<Vec<ReceivedMessage>>;

    async fn delete(&self, receipt_handle: &str) -> Result<()>;

    async fn extend_visibility(&self, receipt_handle: &str, timeout: Duration) -> Result<()>;
}
