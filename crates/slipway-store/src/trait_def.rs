use async_trait::async_trait;
use slipway_core::Deployment;
use uuid::Uuid;

use crate::error::Result;

/// Persists deployment state transitions and appends structured build-log
/// entries (C9, §4.6). Every transition method corresponds to exactly one
/// row in the table of §4.6; there is deliberately no generic `save` that
/// lets a caller write an arbitrary status.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait DeploymentStore: Send + Sync {
    async fn create(&self, project_id: Uuid) -> Result<Deployment>;

    async fn get(&self, id: Uuid) -> Result<Option<Deployment>>;

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Deployment>>;

    /// `queued -> building`.
    async fn mark_building(&self, id: Uuid, worker_id: &str) -> Result<()>;

    /// `building -> deploying`.
    async fn mark_deploying(&self, id: Uuid, image_id: &str, worker_id: &str) -> Result<()>;

    /// `deploying -> running`.
    async fn mark_running(&self, id: Uuid, container_id: &str, url: &str) -> Result<()>;

    /// `{building,deploying,running} -> failed`.
    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<()>;

    /// `running -> stopped`.
    async fn mark_stopped(&self, id: Uuid) -> Result<()>;

    async fn append_log(&self, id: Uuid, message: &str, worker_id: &str) -> Result<()>;
}
