use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use slipway_core::JobMessage;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::Result;
use crate::trait_def::{JobQueue, ReceivedMessage};

struct Inflight {
    job: JobMessage,
    visible_at: chrono::DateTime<chrono::Utc>,
}

/// Test double and local-mode queue: an in-process FIFO with the same
/// receipt-handle/visibility-timeout contract as [`crate::sqs_queue::SqsQueue`],
/// so a worker built against `JobQueue` cannot tell the difference.
#[derive(Default)]
pub struct InMemoryQueue {
    pending: Mutex<Vec<JobMessage>>,
    inflight: Mutex<HashMap<String, Inflight>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobQueue for InMemoryQueue {
    async fn enqueue(&self, job: &JobMessage) -> Result<()> {
        self.pending.lock().await.push(job.clone());
        Ok(())
    }

    async fn receive(&self, max_messages: usize, _wait_time: Duration) -> Result<Vec<ReceivedMessage>> {
        let mut pending = self.pending.lock().await;
        let mut inflight = self.inflight.lock().await;

        let take = max_messages.min(pending.len());
        let drained: Vec<JobMessage> = pending.drain(..take).collect();
        drop(pending);

        let mut out = Vec::with_capacity(drained.len());
        for job in drained {
            let receipt_handle = Uuid::new_v4().to_string();
            inflight.insert(
                receipt_handle.clone(),
                Inflight {
                    job: job.clone(),
                    visible_at: chrono::Utc::now() + chrono::Duration::minutes(15),
                },
            );
            out.push(ReceivedMessage {
                receipt_handle,
                job: Ok(job),
            });
        }
        Ok(out)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<()> {
        self.inflight.lock().await.remove(receipt_handle);
        Ok(())
    }

    async fn extend_visibility(&self, receipt_handle: &str, timeout: Duration) -> Result<()> {
        if let Some(entry) = self.inflight.lock().await.get_mut(receipt_handle) {
            entry.visible_at = chrono::Utc::now()
                + chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::zero());
        }
        Ok(())
    }
}
