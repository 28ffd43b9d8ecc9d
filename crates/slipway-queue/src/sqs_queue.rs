use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::Client;
use slipway_core::{JobMessage, QueueSettings};

use crate::error::{QueueError, Result};
use crate::trait_def::{JobQueue, ReceivedMessage};

/// Production `JobQueue` backed by Amazon SQS. At-least-once delivery
/// (§4.5) comes from SQS itself; this adapter only translates between
/// `JobMessage` JSON and SQS's receipt-handle protocol.
pub struct SqsQueue {
    client: Client,
    queue_url: String,
    visibility_timeout: Duration,
}

impl SqsQueue {
    pub async fn connect(settings: &QueueSettings, visibility_timeout: Duration) -> Self {
        let region = Region::new(settings.aws_region.clone());
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        Self {
            client: Client::new(&config),
            queue_url: settings.queue_url.clone(),
            visibility_timeout,
        }
    }
}

#[async_trait]
impl JobQueue for SqsQueue {
    async fn enqueue(&self, job: &JobMessage) -> Result<()> {
        let body = serde_json::to_string(job).map_err(|e| QueueError::Send(e.to_string()))?;

        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| QueueError::Send(e.to_string()))?;

        Ok(())
    }

    async fn receive(&self, max_messages: usize, wait_time: Duration) -> Result<Vec<ReceivedMessage>> {
        let response = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages.min(10) as i32)
            .wait_time_seconds(wait_time.as_secs().min(20) as i32)
            .visibility_timeout(self.visibility_timeout.as_secs() as i32)
            .send()
            .await
            .map_err(|e| QueueError::Receive(e.to_string()))?;

        let messages = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| {
                let receipt_handle = raw.receipt_handle?;
                let job = raw
                    .body
                    .ok_or_else(|| "message had no body".to_owned())
                    .and_then(|body| {
                        serde_json::from_str::<JobMessage>(&body).map_err(|e| e.to_string())
                    });
                Some(ReceivedMessage { receipt_handle, job })
            })
            .collect();

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<()> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::Delete(e.to_string()))?;
        Ok(())
    }

    async fn extend_visibility(&self, receipt_handle: &str, timeout: Duration) -> Result<()> {
        self.client
            .change_message_visibility()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .visibility_timeout(timeout.as_secs() as i32)
            .send()
            .await
            .map_err(|e| QueueError::ExtendVisibility(e.to_string()))?;
        Ok(())
    }
}
