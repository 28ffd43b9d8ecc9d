use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire encoding for `JobMessage.project_files` (§6: `map<path,
/// base64-bytes>`). Plain `serde_json` would render `Vec<u8>` as an array
/// of numbers, so each value is base64-encoded through this module instead.
mod project_files_base64 {
    use std::collections::HashMap;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(map: &HashMap<String, Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded: HashMap<&String, String> =
            map.iter().map(|(path, bytes)| (path, STANDARD.encode(bytes))).collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: HashMap<String, String> = HashMap::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(path, text)| {
                STANDARD
                    .decode(text)
                    .map(|bytes| (path, bytes))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

/// Technology class produced by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tech {
    Nodejs,
    Python,
    Go,
    Static,
    Unknown,
}

impl std::fmt::Display for Tech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tech::Nodejs => "nodejs",
            Tech::Python => "python",
            Tech::Go => "go",
            Tech::Static => "static",
            Tech::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Output of detection: everything the synthesizer and runtime adapter need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub tech: Tech,
    pub build_command: Option<String>,
    pub start_command: String,
    pub port: u16,
    #[serde(default)]
    pub environment: HashMap<String, String>,
    #[serde(default = "default_install_path")]
    pub install_path: String,
    /// Name of the detector that produced this config. Diagnostics only.
    #[serde(default)]
    pub raw_detector: String,
}

fn default_install_path() -> String {
    "/app".to_owned()
}

impl Config {
    /// Invariant: `start_command` non-empty unless tech is `static`.
    pub fn is_valid(&self) -> bool {
        self.tech == Tech::Static || !self.start_command.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Pending,
    Detecting,
    Deployed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    /// Unique across all live projects; see `slipway_orchestrator::subdomain`.
    pub subdomain: String,
    pub tech: Tech,
    pub status: ProjectStatus,
    pub url: Option<String>,
}

/// Deployment lifecycle. Terminal states: `Running`, `Failed`, `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Queued,
    Building,
    Deploying,
    Running,
    Failed,
    Stopped,
}

impl DeploymentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DeploymentStatus::Running | DeploymentStatus::Failed | DeploymentStatus::Stopped
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub worker_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub status: DeploymentStatus,
    pub container_id: Option<String>,
    pub image_id: Option<String>,
    pub url: Option<String>,
    pub logs: Vec<BuildLogEntry>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub build_started_at: Option<DateTime<Utc>>,
    pub build_completed_at: Option<DateTime<Utc>>,
    pub deployed_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
}

impl Deployment {
    pub fn new(project_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            status: DeploymentStatus::Queued,
            container_id: None,
            image_id: None,
            url: None,
            logs: Vec::new(),
            failure_reason: None,
            created_at: Utc::now(),
            build_started_at: None,
            build_completed_at: None,
            deployed_at: None,
            failed_at: None,
            stopped_at: None,
        }
    }

    /// Append-only: build logs are never deleted or reordered.
    pub fn push_log(&mut self, message: impl Into<String>, worker_id: impl Into<String>) {
        self.logs.push(BuildLogEntry {
            timestamp: Utc::now(),
            message: message.into(),
            worker_id: worker_id.into(),
        });
    }

    /// `queued -> building`.
    pub fn mark_building(&mut self, worker_id: &str) {
        self.status = DeploymentStatus::Building;
        self.build_started_at = Some(Utc::now());
        self.push_log("build started", worker_id);
    }

    /// `building -> deploying`.
    pub fn mark_deploying(&mut self, image_id: String, worker_id: &str) {
        self.push_log(format!("image built {}", short_id(&image_id)), worker_id);
        self.image_id = Some(image_id);
        self.status = DeploymentStatus::Deploying;
        self.build_completed_at = Some(Utc::now());
    }

    /// `deploying -> running`.
    pub fn mark_running(&mut self, container_id: String, url: String) {
        self.container_id = Some(container_id);
        self.url = Some(url);
        self.status = DeploymentStatus::Running;
        self.deployed_at = Some(Utc::now());
    }

    /// `{building,deploying,running} -> failed`. Reachable from any
    /// non-queued, non-terminal state.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.failure_reason = Some(reason.into());
        self.status = DeploymentStatus::Failed;
        self.failed_at = Some(Utc::now());
    }

    /// `running -> stopped`.
    pub fn mark_stopped(&mut self) {
        self.status = DeploymentStatus::Stopped;
        self.stopped_at = Some(Utc::now());
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(12)]
}

/// Unit of queued work (§6 wire format). Self-contained: a worker may run
/// without talking back to the control plane for inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMessage {
    pub deployment_id: Uuid,
    pub project_name: String,
    /// Build context, path -> bytes. Encoded on the wire as
    /// `map<path, base64-bytes>`, not a raw byte array.
    #[serde(with = "project_files_base64")]
    pub project_files: HashMap<String, Vec<u8>>,
    pub dockerfile_content: Option<String>,
    #[serde(default)]
    pub environment: HashMap<String, String>,
    #[serde(default)]
    pub ports: HashMap<u16, u16>,
    pub config: Option<Config>,
    #[serde(default)]
    pub ai_verified: bool,
    pub decision_id: Option<String>,
    pub worker_public_ip: Option<String>,
}

/// In-memory view of a running container, held by the orchestrator. Not
/// persisted across worker restart — re-derived from the runtime on boot.
#[derive(Debug, Clone)]
pub struct ContainerRecord {
    pub project_id: Uuid,
    pub container_id: String,
    pub image_id: String,
    pub status: DeploymentStatus,
    pub port_bindings: HashMap<u16, u16>,
    pub created_at: DateTime<Utc>,
    pub config: Config,
}
