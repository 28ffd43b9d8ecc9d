use std::sync::Arc;

use slipway_core::{QueueSettings, RuntimeSettings, StoreSettings, WorkerSettings};
use slipway_orchestrator::Orchestrator;
use slipway_queue::SqsQueue;
use slipway_runtime::BollardRuntime;
use slipway_store::PostgresStore;
use slipway_worker::Worker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let worker_settings = WorkerSettings::from_env()?;
    let queue_settings = QueueSettings::from_env()?;
    let store_settings = StoreSettings::from_env()?;
    let runtime_settings = RuntimeSettings::from_env()?;
    let base_domain = std::env::var("BASE_DOMAIN").ok();

    tracing::info!(
        worker_id = %worker_settings.worker_id,
        max_concurrent_jobs = worker_settings.max_concurrent_jobs,
        "starting worker"
    );

    let queue = Arc::new(SqsQueue::connect(&queue_settings, worker_settings.message_visibility_timeout).await);
    let store = Arc::new(PostgresStore::connect(&store_settings).await?);
    let runtime = Arc::new(BollardRuntime::connect(&runtime_settings.docker_socket)?);
    let orchestrator = Arc::new(Orchestrator::new(runtime, worker_settings.deploy_mode, base_domain));

    let worker = Worker::new(queue, store, orchestrator, worker_settings);
    worker.run().await;
}
