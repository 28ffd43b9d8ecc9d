use std::collections::HashMap;
use std::sync::Arc;

use slipway_core::{Config, ContainerRecord, DeployMode, DeploymentStatus};
use slipway_detect::DetectionEngine;
use slipway_runtime::{ContainerRuntime, ResourceLimits};
use uuid::Uuid;

use crate::error::{DeploymentError, Result};
use crate::registry::ActiveDeployments;

#[derive(Debug, Clone)]
pub struct DeploymentInfo {
    pub project_id: Uuid,
    pub container_id: String,
    pub image_id: String,
    pub status: DeploymentStatus,
    pub url: String,
    pub ports: HashMap<u16, u16>,
    pub config: Config,
}

/// Extract -> Detect -> Synthesize -> Build -> Run -> Inspect -> Publish
/// (C6, §4.4). Holds no database handle — status persistence is the
/// worker/store's responsibility (see `slipway_worker`); this type only
/// runs the inner build-and-run and tracks active containers in memory.
pub struct Orchestrator {
    runtime: Arc<dyn ContainerRuntime>,
    registry: ActiveDeployments,
    deploy_mode: DeployMode,
    base_domain: Option<String>,
}

impl Orchestrator {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, deploy_mode: DeployMode, base_domain: Option<String>) -> Self {
        Self {
            runtime,
            registry: ActiveDeployments::new(),
            deploy_mode,
            base_domain,
        }
    }

    pub fn registry(&self) -> &ActiveDeployments {
        &self.registry
    }

    pub async fn deploy(
        &self,
        project_id: Uuid,
        project_name: &str,
        subdomain: &str,
        bundle: &[u8],
        engine: &DetectionEngine,
        env_overrides: HashMap<String, String>,
    ) -> Result<DeploymentInfo> {
        // 1. Extract — scoped acquisition, released on every exit path via Drop.
        let temp_dir = slipway_build::bundle::extract_bundle(bundle)?;

        // 2. Detect
        let mut config = engine.detect(temp_dir.path()).map_err(DeploymentError::from)?;
        config.environment.extend(env_overrides);

        // 3. Synthesize
        let dockerfile = slipway_build::DockerfileGenerator::new(&config).render();
        std::fs::write(temp_dir.path().join("Dockerfile"), &dockerfile).map_err(|e| {
            DeploymentError::build(format!("failed to write Dockerfile: {e}"), String::new())
        })?;

        let labels = slipway_runtime::labels::labels(project_name, project_id);
        let tag = format!("dprod/{}:{}", crate::subdomain::slugify(project_name), project_id);

        // 4. Build
        let image_id = self
            .runtime
            .build_image(temp_dir.path(), &tag, labels.clone())
            .await?;

        // 5. Run
        let container_name = slipway_runtime::labels::container_name(subdomain);
        let container_id = self
            .runtime
            .run_container(
                &image_id,
                &container_name,
                config.environment.clone(),
                config.port,
                ResourceLimits::default(),
                labels,
            )
            .await?;

        // 6. Inspect
        let inspection = self.runtime.inspect_container(&container_id).await?;
        let host_port = inspection
            .ports
            .get(&config.port)
            .copied()
            .ok_or_else(|| DeploymentError::runtime("no host port bound for container"))?;

        let url = match self.deploy_mode {
            DeployMode::Dev => format!("http://localhost:{host_port}"),
            DeployMode::Prod => {
                let base_domain = self
                    .base_domain
                    .as_deref()
                    .ok_or_else(|| DeploymentError::runtime("base domain not configured for prod mode"))?;
                format!("https://{subdomain}.{base_domain}")
            }
        };

        // 7. Publish
        self.registry.insert(ContainerRecord {
            project_id,
            container_id: container_id.clone(),
            image_id: image_id.clone(),
            status: DeploymentStatus::Running,
            port_bindings: inspection.ports.clone(),
            created_at: chrono::Utc::now(),
            config: config.clone(),
        });

        Ok(DeploymentInfo {
            project_id,
            container_id,
            image_id,
            status: DeploymentStatus::Running,
            url,
            ports: inspection.ports,
            config,
        })
    }

    /// Control-plane `stop` request (open question #2): stop then remove.
    pub async fn stop(&self, project_id: Uuid) -> Result<()> {
        let record = self
            .registry
            .remove(project_id)
            .ok_or_else(|| DeploymentError::runtime("no active deployment for project"))?;

        self.runtime.stop_container(&record.container_id, 10).await?;
        self.runtime.remove_container(&record.container_id, true).await?;
        Ok(())
    }
}
