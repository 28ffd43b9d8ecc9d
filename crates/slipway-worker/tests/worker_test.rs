use std::collections::HashMap;
use std::sync::Arc;

use slipway_core::{DeployMode, DeploymentStatus, JobMessage, WorkerSettings};
use slipway_orchestrator::Orchestrator;
use slipway_queue::{InMemoryQueue, JobQueue, ReceivedMessage};
use slipway_runtime::trait_def::{ContainerInspection, ContainerStatus};
use slipway_runtime::MockContainerRuntime;
use slipway_store::{DeploymentStore, InMemoryStore};
use slipway_worker::Worker;
use std::time::Duration;
use uuid::Uuid;

fn settings() -> WorkerSettings {
    WorkerSettings {
        worker_id: "worker-test".to_owned(),
        worker_public_ip: None,
        max_concurrent_jobs: 3,
        poll_interval: Duration::from_secs(1),
        message_visibility_timeout: Duration::from_secs(900),
        deploy_mode: DeployMode::Dev,
    }
}

fn nodejs_job(deployment_id: Uuid) -> JobMessage {
    let mut files = HashMap::new();
    files.insert(
        "package.json".to_owned(),
        br#"{"name":"a","scripts":{"start":"node server.js"}}"#.to_vec(),
    );
    files.insert("server.js".to_owned(), b"listen(3000)".to_vec());

    JobMessage {
        deployment_id,
        project_name: "acme".to_owned(),
        project_files: files,
        dockerfile_content: None,
        environment: HashMap::new(),
        ports: HashMap::new(),
        config: None,
        ai_verified: false,
        decision_id: None,
        worker_public_ip: None,
    }
}

fn happy_runtime() -> MockContainerRuntime {
    let mut mock = MockContainerRuntime::new();
    mock.expect_build_image().returning(|_, tag, _| Ok(tag.to_owned()));
    mock.expect_run_container()
        .returning(|_, _, _, _, _, _| Ok("container-1".to_owned()));
    mock.expect_inspect_container().returning(|_| {
        Ok(ContainerInspection {
            status: ContainerStatus::Running,
            ports: HashMap::from([(3000, 32768)]),
            created_at: chrono::Utc::now(),
            networks: vec![],
        })
    });
    mock
}

#[tokio::test]
async fn happy_path_job_ends_running_and_acks() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStore::new());
    let orchestrator = Arc::new(Orchestrator::new(Arc::new(happy_runtime()), DeployMode::Dev, None));

    let deployment = store.create(Uuid::new_v4()).await.unwrap();
    let job = nodejs_job(deployment.id);
    queue.enqueue(&job).await.unwrap();

    let worker = Worker::new(queue.clone(), store.clone(), orchestrator, settings());
    let received = queue.receive(1, Duration::from_secs(1)).await.unwrap();
    worker.process_one(received.into_iter().next().unwrap()).await;

    let updated = store.get(deployment.id).await.unwrap().unwrap();
    assert_eq!(updated.status, DeploymentStatus::Running);
    assert!(updated.container_id.is_some());
    assert!(updated.url.as_deref().unwrap().starts_with("http://localhost:"));

    // Message should have been ack'd — queue has nothing left in flight or pending.
    let drained = queue.receive(10, Duration::from_secs(1)).await.unwrap();
    assert!(drained.is_empty());
}

#[tokio::test]
async fn build_failure_ends_failed_with_reason() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStore::new());

    let mut mock = MockContainerRuntime::new();
    mock.expect_build_image().returning(|_, _, _| {
        Err(slipway_runtime::RuntimeError::Build {
            message: "exit code 1".to_owned(),
            log_tail: "last lines of output".to_owned(),
        })
    });
    let orchestrator = Arc::new(Orchestrator::new(Arc::new(mock), DeployMode::Dev, None));

    let deployment = store.create(Uuid::new_v4()).await.unwrap();
    let job = nodejs_job(deployment.id);
    queue.enqueue(&job).await.unwrap();

    let worker = Worker::new(queue.clone(), store.clone(), orchestrator, settings());
    let received = queue.receive(1, Duration::from_secs(1)).await.unwrap();
    worker.process_one(received.into_iter().next().unwrap()).await;

    let updated = store.get(deployment.id).await.unwrap().unwrap();
    assert_eq!(updated.status, DeploymentStatus::Failed);
    assert!(updated.failure_reason.as_deref().unwrap().starts_with("build:"));
}

#[tokio::test]
async fn duplicate_delivery_for_running_deployment_is_ack_and_discard() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStore::new());
    let orchestrator = Arc::new(Orchestrator::new(Arc::new(happy_runtime()), DeployMode::Dev, None));

    let deployment = store.create(Uuid::new_v4()).await.unwrap();
    store.mark_building(deployment.id, "worker-test").await.unwrap();
    store.mark_deploying(deployment.id, "img", "worker-test").await.unwrap();
    store
        .mark_running(deployment.id, "container-1", "http://localhost:1")
        .await
        .unwrap();

    let job = nodejs_job(deployment.id);
    queue.enqueue(&job).await.unwrap();

    let worker = Worker::new(queue.clone(), store.clone(), orchestrator, settings());
    let received = queue.receive(1, Duration::from_secs(1)).await.unwrap();
    worker.process_one(received.into_iter().next().unwrap()).await;

    // Still running, unchanged container id — the duplicate did nothing.
    let after = store.get(deployment.id).await.unwrap().unwrap();
    assert_eq!(after.status, DeploymentStatus::Running);
    assert_eq!(after.container_id.as_deref(), Some("container-1"));
}

#[tokio::test]
async fn undecodable_message_is_acked_and_dropped() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStore::new());
    let orchestrator = Arc::new(Orchestrator::new(Arc::new(MockContainerRuntime::new()), DeployMode::Dev, None));
    let worker = Worker::new(queue.clone(), store.clone(), orchestrator, settings());

    let bogus = ReceivedMessage {
        receipt_handle: "r1".to_owned(),
        job: Err("invalid json".to_owned()),
    };
    worker.process_one(bogus).await;
    // No panic, no deployment created — nothing more to assert against an
    // in-memory queue that never tracked this receipt handle.
}
