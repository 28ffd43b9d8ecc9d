use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use bollard::container::{
    Config as ContainerConfig, CreateContainerOptions, LogsOptions, RemoveContainerOptions,
    StatsOptions, StopContainerOptions,
};
use bollard::image::BuildImageOptions;
use bollard::models::{HostConfig, PortBinding};
use bollard::Docker;
use futures_util::StreamExt;

use crate::error::{Result, RuntimeError};
use crate::stats::StatsSnapshot;
use crate::trait_def::{ContainerInspection, ContainerRuntime, ContainerStatus, ResourceLimits};

pub struct BollardRuntime {
    docker: Docker,
}

impl BollardRuntime {
    pub fn connect(socket: &str) -> Result<Self> {
        let docker = if let Some(path) = socket.strip_prefix("unix://") {
            Docker::connect_with_socket(path, 120, bollard::API_DEFAULT_VERSION)
        } else {
            Docker::connect_with_local_defaults()
        }
        .map_err(|e| RuntimeError::Container(e.to_string()))?;

        Ok(Self { docker })
    }

    /// Round-trips a ping against the daemon. Used by `doctor`-style
    /// readiness checks; not part of `ContainerRuntime` since nothing in
    /// the deploy pipeline itself needs it.
    pub async fn ping(&self) -> Result<()> {
        self.docker
            .ping()
            .await
            .map(|_| ())
            .map_err(|e| RuntimeError::Container(e.to_string()))
    }
}

#[async_trait]
impl ContainerRuntime for BollardRuntime {
    async fn build_image(
        &self,
        context_dir: &Path,
        tag: &str,
        labels: HashMap<String, String>,
    ) -> Result<String> {
        let tar_bytes = crate::tarball::tar_directory(context_dir)
            .map_err(|e| RuntimeError::Build {
                message: e.to_string(),
                log_tail: String::new(),
            })?;

        let options = BuildImageOptions {
            t: tag.to_owned(),
            labels,
            rm: true,
            ..Default::default()
        };

        let mut stream = self
            .docker
            .build_image(options, None, Some(tar_bytes.into()));

        let mut log_lines: Vec<String> = Vec::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(info) => {
                    if let Some(stream_line) = info.stream {
                        log_lines.push(stream_line);
                    }
                    if let Some(error) = info.error {
                        return Err(RuntimeError::Build {
                            message: error,
                            log_tail: tail(&log_lines, 64),
                        });
                    }
                }
                Err(e) => {
                    return Err(RuntimeError::Build {
                        message: e.to_string(),
                        log_tail: tail(&log_lines, 64),
                    });
                }
            }
        }

        Ok(tag.to_owned())
    }

    async fn run_container(
        &self,
        image: &str,
        name: &str,
        env: HashMap<String, String>,
        container_port: u16,
        limits: ResourceLimits,
        labels: HashMap<String, String>,
    ) -> Result<String> {
        let port_key = format!("{container_port}/tcp");
        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            port_key.clone(),
            Some(vec![PortBinding {
                host_ip: None,
                host_port: None,
            }]),
        );

        let mut exposed_ports = HashMap::new();
        exposed_ports.insert(port_key, HashMap::new());

        let env: Vec<String> = env.into_iter().map(|(k, v)| format!("{k}={v}")).collect();

        let config = ContainerConfig {
            image: Some(image.to_owned()),
            env: Some(env),
            labels: Some(labels),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                memory: Some(limits.memory_bytes),
                cpu_period: Some(limits.cpu_period),
                cpu_quota: Some(limits.cpu_quota),
                publish_all_ports: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        let created = self
            .docker
            .create_container(
                Some(CreateContainerOptions {
                    name: name.to_owned(),
                    platform: None,
                }),
                config,
            )
            .await
            .map_err(|e| RuntimeError::Container(e.to_string()))?;

        self.docker
            .start_container::<String>(&created.id, None)
            .await
            .map_err(|e| RuntimeError::Container(e.to_string()))?;

        Ok(created.id)
    }

    async fn inspect_container(&self, id: &str) -> Result<ContainerInspection> {
        let inspect = self
            .docker
            .inspect_container(id, None)
            .await
            .map_err(|_| RuntimeError::NotFound(id.to_owned()))?;

        let status = match inspect.state.as_ref().and_then(|s| s.status) {
            Some(bollard::models::ContainerStateStatusEnum::RUNNING) => ContainerStatus::Running,
            Some(bollard::models::ContainerStateStatusEnum::EXITED) => ContainerStatus::Exited,
            Some(bollard::models::ContainerStateStatusEnum::CREATED) => ContainerStatus::Created,
            _ => ContainerStatus::Unknown,
        };

        let mut ports = HashMap::new();
        let mut networks = Vec::new();
        if let Some(network_settings) = inspect.network_settings {
            if let Some(port_map) = network_settings.ports {
                for (container_port, bindings) in port_map {
                    let container_port: u16 = container_port
                        .split('/')
                        .next()
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(0);
                    if let Some(host_port) = bindings
                        .into_iter()
                        .flatten()
                        .find_map(|b| b.host_port)
                        .and_then(|p| p.parse().ok())
                    {
                        ports.insert(container_port, host_port);
                    }
                }
            }
            if let Some(named_networks) = network_settings.networks {
                networks = named_networks.into_keys().collect();
            }
        }

        Ok(ContainerInspection {
            status,
            ports,
            created_at: inspect
                .created
                .and_then(|c| chrono::DateTime::parse_from_rfc3339(&c).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(chrono::Utc::now),
            networks,
        })
    }

    async fn logs(&self, id: &str, tail: usize, timestamps: bool) -> Result<Vec<u8>> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            tail: tail.to_string(),
            timestamps,
            ..Default::default()
        };

        let mut stream = self.docker.logs(id, Some(options));
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(log_output) => bytes.extend_from_slice(&log_output.into_bytes()),
                Err(_) => return Err(RuntimeError::NotFound(id.to_owned())),
            }
        }
        Ok(bytes)
    }

    async fn stop_container(&self, id: &str, timeout_secs: i64) -> Result<()> {
        self.docker
            .stop_container(id, Some(StopContainerOptions { t: timeout_secs }))
            .await
            .map_err(|e| RuntimeError::Container(e.to_string()))
    }

    async fn remove_container(&self, id: &str, force: bool) -> Result<()> {
        self.docker
            .remove_container(
                id,
                Some(RemoveContainerOptions {
                    force,
                    v: true,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| RuntimeError::Container(e.to_string()))
    }

    async fn stats(&self, id: &str) -> Result<StatsSnapshot> {
        let mut stream = self.docker.stats(
            id,
            Some(StatsOptions {
                stream: false,
                one_shot: true,
            }),
        );

        let stats = stream
            .next()
            .await
            .ok_or_else(|| RuntimeError::NotFound(id.to_owned()))?
            .map_err(|e| RuntimeError::Container(e.to_string()))?;

        let cpu_delta = stats.cpu_stats.cpu_usage.total_usage as f64
            - stats.precpu_stats.cpu_usage.total_usage as f64;
        let system_delta = stats.cpu_stats.system_cpu_usage.unwrap_or(0) as f64
            - stats.precpu_stats.system_cpu_usage.unwrap_or(0) as f64;
        let online_cpus = stats
            .cpu_stats
            .online_cpus
            .or_else(|| stats.cpu_stats.cpu_usage.percpu_usage.as_ref().map(|v| v.len() as u64))
            .unwrap_or(1) as f64;

        let memory_used = stats.memory_stats.usage.unwrap_or(0);
        let memory_limit = stats.memory_stats.limit.unwrap_or(0);

        let (rx, tx) = stats
            .networks
            .as_ref()
            .map(|nets| {
                nets.values()
                    .fold((0u64, 0u64), |(rx, tx), n| (rx + n.rx_bytes, tx + n.tx_bytes))
            })
            .unwrap_or((0, 0));

        let (read, write) = stats
            .blkio_stats
            .io_service_bytes_recursive
            .unwrap_or_default()
            .into_iter()
            .fold((0u64, 0u64), |(read, write), entry| {
                match entry.op.to_lowercase().as_str() {
                    "read" => (read + entry.value, write),
                    "write" => (read, write + entry.value),
                    _ => (read, write),
                }
            });

        Ok(StatsSnapshot {
            cpu_delta,
            system_delta,
            online_cpus,
            memory_used_bytes: memory_used,
            memory_limit_bytes: memory_limit,
            network_rx_bytes: rx,
            network_tx_bytes: tx,
            blkio_read_bytes: read,
            blkio_write_bytes: write,
        })
    }
}

fn tail(lines: &[String], n: usize) -> String {
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
