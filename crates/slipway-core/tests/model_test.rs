use std::collections::HashMap;

use proptest::prelude::*;
use slipway_core::{Config, Deployment, DeploymentStatus, JobMessage, Tech};
use uuid::Uuid;

fn sample_job(project_files: HashMap<String, Vec<u8>>) -> JobMessage {
    JobMessage {
        deployment_id: Uuid::new_v4(),
        project_name: "acme".to_owned(),
        project_files,
        dockerfile_content: None,
        environment: HashMap::new(),
        ports: HashMap::new(),
        config: None,
        ai_verified: false,
        decision_id: None,
        worker_public_ip: None,
    }
}

fn sample_config() -> Config {
    Config {
        tech: Tech::Nodejs,
        build_command: Some("npm ci --only=production".to_owned()),
        start_command: "node server.js".to_owned(),
        port: 3000,
        environment: Default::default(),
        install_path: "/app".to_owned(),
        raw_detector: "nodejs".to_owned(),
    }
}

#[test]
fn config_requires_start_command_unless_static() {
    let mut config = sample_config();
    assert!(config.is_valid());
    config.start_command.clear();
    assert!(!config.is_valid());

    config.tech = Tech::Static;
    assert!(config.is_valid());
}

#[test]
fn deployment_transitions_follow_the_state_machine() {
    let project_id = Uuid::new_v4();
    let mut deployment = Deployment::new(project_id);
    assert_eq!(deployment.status, DeploymentStatus::Queued);

    deployment.mark_building("worker-1");
    assert_eq!(deployment.status, DeploymentStatus::Building);
    assert!(deployment.build_started_at.is_some());

    deployment.mark_deploying("sha256:abcdef0123456789".to_owned(), "worker-1");
    assert_eq!(deployment.status, DeploymentStatus::Deploying);
    assert_eq!(deployment.image_id.as_deref(), Some("sha256:abcdef0123456789"));

    deployment.mark_running("c1".to_owned(), "http://localhost:32768".to_owned());
    assert_eq!(deployment.status, DeploymentStatus::Running);
    assert!(deployment.container_id.is_some());
    assert!(deployment.url.is_some());
    assert!(deployment.status.is_terminal());
}

#[test]
fn failed_deployment_always_carries_a_reason() {
    let mut deployment = Deployment::new(Uuid::new_v4());
    deployment.mark_building("worker-1");
    deployment.mark_failed("build:exit code 1");

    assert_eq!(deployment.status, DeploymentStatus::Failed);
    assert!(deployment.failure_reason.is_some());
    assert!(deployment.status.is_terminal());
}

#[test]
fn build_logs_are_append_only() {
    let mut deployment = Deployment::new(Uuid::new_v4());
    deployment.mark_building("worker-1");
    let before = deployment.logs.len();
    deployment.push_log("image built abc123", "worker-1");
    assert_eq!(deployment.logs.len(), before + 1);
    // earlier entries are untouched
    assert_eq!(deployment.logs[0].message, "build started");
}

#[test]
fn stopped_is_only_reachable_from_running() {
    let mut deployment = Deployment::new(Uuid::new_v4());
    deployment.mark_building("worker-1");
    deployment.mark_deploying("img".to_owned(), "worker-1");
    deployment.mark_running("c1".to_owned(), "http://localhost:1".to_owned());
    deployment.mark_stopped();
    assert_eq!(deployment.status, DeploymentStatus::Stopped);
    assert!(deployment.stopped_at.is_some());
}

#[test]
fn job_message_project_files_serialize_as_base64_strings_not_byte_arrays() {
    let mut files = HashMap::new();
    files.insert("src/index.js".to_owned(), b"console.log(1)".to_vec());

    let job = sample_job(files);
    let wire = serde_json::to_value(&job).unwrap();
    let encoded = wire["project_files"]["src/index.js"].as_str().unwrap();
    assert_eq!(encoded, "Y29uc29sZS5sb2coMSk=");
}

proptest! {
    /// Invariant: any `project_files` map survives a JSON round-trip
    /// byte-for-byte, regardless of content (including non-UTF8 bytes).
    #[test]
    fn job_message_project_files_round_trip(
        paths_and_bytes in prop::collection::vec(
            ("[a-z/]{1,12}", prop::collection::vec(any::<u8>(), 0..32)),
            0..6,
        )
    ) {
        let files: HashMap<String, Vec<u8>> = paths_and_bytes.into_iter().collect();
        let job = sample_job(files.clone());

        let wire = serde_json::to_string(&job).unwrap();
        let decoded: JobMessage = serde_json::from_str(&wire).unwrap();

        prop_assert_eq!(decoded.project_files, files);
    }
}
