use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::stats::StatsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Running,
    Exited,
    Created,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ContainerInspection {
    pub status: ContainerStatus,
    /// container-port -> host-port, for every published port.
    pub ports: HashMap<u16, u16>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub networks: Vec<String>,
}

/// Resource caps a container is launched with. Defaults per §4.3: 512 MB
/// memory, 50% of one CPU core (period 100000 / quota 50000).
#[derive(Debug, Clone, Copy)]
pub struct ResourceLimits {
    pub memory_bytes: i64,
    pub cpu_period: i64,
    pub cpu_quota: i64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            memory_bytes: 512 * 1024 * 1024,
            cpu_period: 100_000,
            cpu_quota: 50_000,
        }
    }
}

/// Thin interface over the container daemon (C5). The rest of the system
/// depends only on this trait — [`crate::bollard_runtime::BollardRuntime`]
/// is the production implementation; tests use `mockall`'s generated mock.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn build_image(
        &self,
        context_dir: &Path,
        tag: &str,
        labels: HashMap<String, String>,
    ) -> Result<String>;

    async fn run_container(
        &self,
        image: &str,
        name: &str,
        env: HashMap<String, String>,
        container_port: u16,
        limits: ResourceLimits,
        labels: HashMap<String, String>,
    ) -> Result<String>;

    async fn inspect_container(&self, id: &str) -> Result<ContainerInspection>;

    async fn logs(&self, id: &str, tail: usize, timestamps: bool) -> Result<Vec<u8>>;

    async fn stop_container(&self, id: &str, timeout_secs: i64) -> Result<()>;

    async fn remove_container(&self, id: &str, force: bool) -> Result<()>;

    async fn stats(&self, id: &str) -> Result<StatsSnapshot>;
}
