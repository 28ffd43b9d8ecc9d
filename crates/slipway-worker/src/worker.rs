use std::sync::Arc;
use std::time::Duration;

use slipway_core::{Advisor, JobMessage, NullAdvisor, WorkerSettings};
use slipway_detect::DetectionEngine;
use slipway_orchestrator::Orchestrator;
use slipway_queue::{JobQueue, ReceivedMessage};
use slipway_store::DeploymentStore;
use tokio::sync::Semaphore;

use crate::materialize::materialize_project_files;

/// Long-running process (C8): polls C7, hands each job to the orchestrator
/// (C6's inner build-and-run), reports status via C9. Generic over the
/// queue and store so tests can substitute in-memory doubles for the SQS
/// and Postgres implementations without touching this module.
pub struct Worker<Q, S> {
    queue: Arc<Q>,
    store: Arc<S>,
    orchestrator: Arc<Orchestrator>,
    engine: Arc<DetectionEngine>,
    advisor: Arc<dyn Advisor>,
    settings: WorkerSettings,
}

impl<Q, S> Worker<Q, S>
where
    Q: JobQueue + 'static,
    S: DeploymentStore + 'static,
{
    pub fn new(queue: Arc<Q>, store: Arc<S>, orchestrator: Arc<Orchestrator>, settings: WorkerSettings) -> Self {
        Self::with_advisor(queue, store, orchestrator, settings, Arc::new(NullAdvisor))
    }

    /// Same as [`Worker::new`] but with an advisor other than the default
    /// no-op — mirrors `GcloudClient`'s default-executor-with-override
    /// constructor pair.
    pub fn with_advisor(
        queue: Arc<Q>,
        store: Arc<S>,
        orchestrator: Arc<Orchestrator>,
        settings: WorkerSettings,
        advisor: Arc<dyn Advisor>,
    ) -> Self {
        Self {
            queue,
            store,
            orchestrator,
            engine: Arc::new(DetectionEngine::new()),
            advisor,
            settings,
        }
    }

    /// Poll loop (§4.5, §5): long-polled receive bounded by
    /// `max_concurrent_jobs` in-flight tasks; independent per-task failures
    /// never cancel siblings.
    pub async fn run(&self) -> ! {
        let semaphore = Arc::new(Semaphore::new(self.settings.max_concurrent_jobs));

        loop {
            let permits = semaphore.available_permits().max(1);
            let received = match self
                .queue
                .receive(permits, Duration::from_secs(20))
                .await
            {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!(error = %e, "queue receive failed, backing off");
                    tokio::time::sleep(self.settings.poll_interval).await;
                    continue;
                }
            };

            if received.is_empty() {
                tokio::time::sleep(self.settings.poll_interval).await;
                continue;
            }

            for message in received {
                let permit = semaphore.clone().acquire_owned().await.expect("semaphore never closed");
                let queue = self.queue.clone();
                let store = self.store.clone();
                let orchestrator = self.orchestrator.clone();
                let engine = self.engine.clone();
                let worker_id = self.settings.worker_id.clone();

                let advisor = self.advisor.clone();
                let visibility_timeout = self.settings.message_visibility_timeout;

                tokio::spawn(async move {
                    let _permit = permit;
                    process_message(
                        &*queue,
                        &*store,
                        &orchestrator,
                        &*engine,
                        &*advisor,
                        &worker_id,
                        visibility_timeout,
                        message,
                    )
                    .await;
                });
            }
        }
    }

    /// Single-iteration entry point used directly by tests: processes one
    /// message to completion without the surrounding poll loop.
    pub async fn process_one(&self, message: ReceivedMessage) {
        process_message(
            &*self.queue,
            &*self.store,
            &self.orchestrator,
            &self.engine,
            &*self.advisor,
            &self.settings.worker_id,
            self.settings.message_visibility_timeout,
            message,
        )
        .await;
    }
}

async fn process_message<Q: JobQueue, S: DeploymentStore>(
    queue: &Q,
    store: &S,
    orchestrator: &Orchestrator,
    engine: &DetectionEngine,
    advisor: &dyn Advisor,
    worker_id: &str,
    visibility_timeout: Duration,
    received: ReceivedMessage,
) {
    let job = match received.job {
        Ok(job) => job,
        Err(decode_error) => {
            tracing::warn!(error = %decode_error, "dropping undecodable job message");
            let _ = queue.delete(&received.receipt_handle).await;
            return;
        }
    };

    let deployment_id = job.deployment_id;

    match handle_job(
        queue,
        store,
        orchestrator,
        engine,
        advisor,
        worker_id,
        visibility_timeout,
        &received.receipt_handle,
        &job,
    )
    .await
    {
        Ok(()) => {
            if let Err(e) = queue.delete(&received.receipt_handle).await {
                tracing::warn!(deployment_id = %deployment_id, error = %e, "failed to ack message");
            }
        }
        Err(Retryable) => {
            tracing::warn!(deployment_id = %deployment_id, "leaving message in flight for redelivery");
        }
    }
}

/// Marker: the error variant that means "do not ack — let the queue
/// redeliver" (§7: `QueueError`/`PersistenceError`). Job-level failures are
/// always resolved into a terminal `failed` status and return `Ok`.
struct Retryable;

async fn handle_job<Q: JobQueue, S: DeploymentStore>(
    queue: &Q,
    store: &S,
    orchestrator: &Orchestrator,
    engine: &DetectionEngine,
    advisor: &dyn Advisor,
    worker_id: &str,
    visibility_timeout: Duration,
    receipt_handle: &str,
    job: &JobMessage,
) -> Result<(), Retryable> {
    let existing = store.get(job.deployment_id).await.map_err(|_| Retryable)?;

    // At-least-once handling: redelivery for an already-terminal deployment
    // is a no-op ack, not a retried attempt (§5, §8 invariant 7).
    if let Some(existing) = &existing {
        if existing.status.is_terminal() {
            tracing::info!(
                deployment_id = %job.deployment_id,
                status = ?existing.status,
                "duplicate delivery for terminal deployment"
            );
            return Ok(());
        }
    }

    store
        .mark_building(job.deployment_id, worker_id)
        .await
        .map_err(|_| Retryable)?;

    let temp_dir = match materialize_project_files(&job.project_files) {
        Ok(dir) => dir,
        Err(e) => {
            fail(store, job.deployment_id, &format!("extraction:{e}")).await?;
            return Ok(());
        }
    };

    // Advisory hook (§6, §9): advise before detection proper runs inside
    // the orchestrator, carrying `decision_id` through to the outcome
    // report once the deployment reaches a terminal state. A job that
    // already carries a `decision_id` was advised upstream (e.g. at
    // submission time) — the worker only needs to close the loop on it.
    let (decision_id, env_overrides) = match &job.decision_id {
        Some(id) => (Some(id.clone()), job.environment.clone()),
        None => match engine.detect(temp_dir.path()) {
            Ok(rule_based_config) => {
                let context = slipway_core::AdvisoryContext {
                    project_name: job.project_name.clone(),
                    rule_based_config: rule_based_config.clone(),
                };
                let (advised_config, decision_id, confidence) = advisor.advise(&context);
                let _ = store
                    .append_log(
                        job.deployment_id,
                        &format!("advisory decision {decision_id} (confidence {confidence:.2})"),
                        worker_id,
                    )
                    .await;
                let mut env_overrides = job.environment.clone();
                env_overrides.extend(environment_delta(&rule_based_config, &advised_config));
                let decision_id = if decision_id.is_empty() { None } else { Some(decision_id) };
                (decision_id, env_overrides)
            }
            Err(_) => (None, job.environment.clone()),
        },
    };

    let bundle = match slipway_build::bundle::create_bundle(temp_dir.path()) {
        Ok(bytes) => bytes,
        Err(e) => {
            fail(store, job.deployment_id, &format!("extraction:{e}")).await?;
            return Ok(());
        }
    };

    let subdomain = slipway_orchestrator::subdomain::slugify(&job.project_name);

    let deploy_fut = orchestrator.deploy(
        job.deployment_id,
        &job.project_name,
        &subdomain,
        &bundle,
        engine,
        env_overrides,
    );

    // Visibility extension (§4.5): a build can run close to or past the
    // default 900s timeout, so the in-flight receipt is kept alive by
    // renewing it at half the timeout until the deploy future resolves.
    let result = run_with_visibility_extension(queue, receipt_handle, visibility_timeout, deploy_fut).await;

    match result {
        Ok(info) => {
            store
                .mark_deploying(job.deployment_id, &info.image_id, worker_id)
                .await
                .map_err(|_| Retryable)?;
            store
                .mark_running(job.deployment_id, &info.container_id, &info.url)
                .await
                .map_err(|_| Retryable)?;
            if let Some(id) = &decision_id {
                advisor.verify_outcome(id, true, "deployment reached running");
            }
            Ok(())
        }
        Err(e) => {
            if let Some(tail) = &e.log_tail {
                let _ = store.append_log(job.deployment_id, tail, worker_id).await;
            }
            let reason = e.failure_reason();
            if let Some(id) = &decision_id {
                advisor.verify_outcome(id, false, &reason);
            }
            fail(store, job.deployment_id, &reason).await?;
            Ok(())
        }
    }
}

/// Diff of environment entries the advisor added or changed relative to
/// the rule-based config it was handed — the only part of its
/// recommendation applied without re-plumbing `Orchestrator::deploy` to
/// accept a whole pre-computed `Config`.
fn environment_delta(
    base: &slipway_core::Config,
    advised: &slipway_core::Config,
) -> std::collections::HashMap<String, String> {
    let mut delta = std::collections::HashMap::new();
    for (key, value) in &advised.environment {
        if base.environment.get(key) != Some(value) {
            delta.insert(key.clone(), value.clone());
        }
    }
    delta
}

/// Runs `deploy_fut` to completion, extending `receipt_handle`'s
/// visibility timeout at half the configured interval until it resolves.
async fn run_with_visibility_extension<Q, F, T>(
    queue: &Q,
    receipt_handle: &str,
    visibility_timeout: Duration,
    deploy_fut: F,
) -> T
where
    Q: JobQueue,
    F: std::future::Future<Output = T>,
{
    let interval = (visibility_timeout / 2).max(Duration::from_secs(1));
    tokio::pin!(deploy_fut);

    loop {
        tokio::select! {
            result = &mut deploy_fut => return result,
            _ = tokio::time::sleep(interval) => {
                if let Err(e) = queue.extend_visibility(receipt_handle, visibility_timeout).await {
                    tracing::warn!(error = %e, "failed to extend message visibility");
                }
            }
        }
    }
}

async fn fail<S: DeploymentStore>(store: &S, deployment_id: uuid::Uuid, reason: &str) -> Result<(), Retryable> {
    store.mark_failed(deployment_id, reason).await.map_err(|_| Retryable)
}
