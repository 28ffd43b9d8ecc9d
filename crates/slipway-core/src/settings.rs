//! Environment-driven settings (§6: "Environment configuration consumed by
//! the core"). There is no config file — the environment variables
//! themselves are the documented contract, so each settings struct loads
//! straight from `std::env`.

use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Dev,
    Prod,
}

/// Pacing and identity for a worker process.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub worker_id: String,
    pub worker_public_ip: Option<String>,
    pub max_concurrent_jobs: usize,
    pub poll_interval: Duration,
    pub message_visibility_timeout: Duration,
    pub deploy_mode: DeployMode,
}

impl WorkerSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            worker_id: required("WORKER_ID")?,
            worker_public_ip: optional("WORKER_PUBLIC_IP"),
            max_concurrent_jobs: parse_or("MAX_CONCURRENT_JOBS", 3)?,
            poll_interval: Duration::from_secs(parse_or("POLL_INTERVAL", 5)?),
            message_visibility_timeout: Duration::from_secs(parse_or(
                "MESSAGE_VISIBILITY_TIMEOUT",
                900,
            )?),
            deploy_mode: match optional("DEPLOY_MODE").as_deref() {
                None | Some("dev") => DeployMode::Dev,
                Some("prod") => DeployMode::Prod,
                Some(other) => {
                    return Err(Error::InvalidEnv {
                        name: "DEPLOY_MODE".to_owned(),
                        value: other.to_owned(),
                    });
                }
            },
        })
    }
}

/// SQS queue connection parameters.
#[derive(Debug, Clone)]
pub struct QueueSettings {
    pub aws_region: String,
    pub queue_url: String,
}

impl QueueSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            aws_region: required("AWS_REGION")?,
            queue_url: required("SQS_QUEUE_URL")?,
        })
    }
}

/// Deployment store (database) connection parameters.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_url: String,
}

impl StoreSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
        })
    }
}

/// Container runtime adapter connection parameters.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub docker_socket: String,
    pub container_network: Option<String>,
}

impl RuntimeSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            docker_socket: optional("DOCKER_SOCKET")
                .unwrap_or_else(|| "unix:///var/run/docker.sock".to_owned()),
            container_network: optional("CONTAINER_NETWORK"),
        })
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::MissingEnv(name.to_owned()))
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| Error::InvalidEnv {
            name: name.to_owned(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
