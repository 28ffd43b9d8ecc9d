use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use slipway_core::Deployment;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::trait_def::DeploymentStore;

/// In-process `DeploymentStore`, used by local-mode deploys (no queue/worker
/// split) and by tests. Never performs I/O while holding its lock, same
/// constraint as `slipway_orchestrator::ActiveDeployments` (§5).
#[derive(Default)]
pub struct InMemoryStore {
    deployments: Mutex<HashMap<Uuid, Deployment>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeploymentStore for InMemoryStore {
    async fn create(&self, project_id: Uuid) -> Result<Deployment> {
        let deployment = Deployment::new(project_id);
        self.deployments
            .lock()
            .unwrap()
            .insert(deployment.id, deployment.clone());
        Ok(deployment)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Deployment>> {
        Ok(self.deployments.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Deployment>> {
        Ok(self
            .deployments
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn mark_building(&self, id: Uuid, worker_id: &str) -> Result<()> {
        let mut deployments = self.deployments.lock().unwrap();
        let deployment = deployments.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        deployment.mark_building(worker_id);
        Ok(())
    }

    async fn mark_deploying(&self, id: Uuid, image_id: &str, worker_id: &str) -> Result<()> {
        let mut deployments = self.deployments.lock().unwrap();
        let deployment = deployments.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        deployment.mark_deploying(image_id.to_owned(), worker_id);
        Ok(())
    }

    async fn mark_running(&self, id: Uuid, container_id: &str, url: &str) -> Result<()> {
        let mut deployments = self.deployments.lock().unwrap();
        let deployment = deployments.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        deployment.mark_running(container_id.to_owned(), url.to_owned());
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<()> {
        let mut deployments = self.deployments.lock().unwrap();
        let deployment = deployments.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        deployment.mark_failed(reason);
        Ok(())
    }

    async fn mark_stopped(&self, id: Uuid) -> Result<()> {
        let mut deployments = self.deployments.lock().unwrap();
        let deployment = deployments.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        deployment.mark_stopped();
        Ok(())
    }

    async fn append_log(&self, id: Uuid, message: &str, worker_id: &str) -> Result<()> {
        let mut deployments = self.deployments.lock().unwrap();
        let deployment = deployments.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        deployment.push_log(message, worker_id);
        Ok(())
    }
}
