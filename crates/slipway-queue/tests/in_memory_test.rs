use std::collections::HashMap;
use std::time::Duration;

use slipway_core::JobMessage;
use slipway_queue::{InMemoryQueue, JobQueue};
use uuid::Uuid;

fn job() -> JobMessage {
    JobMessage {
        deployment_id: Uuid::new_v4(),
        project_name: "acme".to_owned(),
        project_files: HashMap::new(),
        dockerfile_content: None,
        environment: HashMap::new(),
        ports: HashMap::new(),
        config: None,
        ai_verified: false,
        decision_id: None,
        worker_public_ip: None,
    }
}

#[tokio::test]
async fn empty_queue_returns_no_messages() {
    let queue = InMemoryQueue::new();
    let received = queue.receive(3, Duration::from_secs(1)).await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn enqueue_then_receive_round_trips_the_job() {
    let queue = InMemoryQueue::new();
    let sent = job();
    queue.enqueue(&sent).await.unwrap();

    let received = queue.receive(10, Duration::from_secs(1)).await.unwrap();
    assert_eq!(received.len(), 1);
    let got = received[0].job.as_ref().unwrap();
    assert_eq!(got.deployment_id, sent.deployment_id);
}

#[tokio::test]
async fn receive_honors_max_messages() {
    let queue = InMemoryQueue::new();
    for _ in 0..5 {
        queue.enqueue(&job()).await.unwrap();
    }

    let first_batch = queue.receive(2, Duration::from_secs(1)).await.unwrap();
    assert_eq!(first_batch.len(), 2);

    let second_batch = queue.receive(10, Duration::from_secs(1)).await.unwrap();
    assert_eq!(second_batch.len(), 3);
}

#[tokio::test]
async fn delete_acknowledges_the_receipt_handle() {
    let queue = InMemoryQueue::new();
    queue.enqueue(&job()).await.unwrap();
    let received = queue.receive(1, Duration::from_secs(1)).await.unwrap();

    queue.delete(&received[0].receipt_handle).await.unwrap();
    // Deleting an already-acked handle again is a no-op, not an error.
    queue.delete(&received[0].receipt_handle).await.unwrap();
}

#[tokio::test]
async fn extend_visibility_on_unknown_handle_is_a_no_op() {
    let queue = InMemoryQueue::new();
    queue
        .extend_visibility("does-not-exist", Duration::from_secs(60))
        .await
        .unwrap();
}
