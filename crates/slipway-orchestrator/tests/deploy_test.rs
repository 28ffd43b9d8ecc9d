use std::collections::HashMap;
use std::sync::Arc;

use slipway_build::bundle::create_bundle;
use slipway_core::DeployMode;
use slipway_detect::DetectionEngine;
use slipway_orchestrator::{ErrorCategory, Orchestrator};
use slipway_runtime::trait_def::{ContainerInspection, ContainerStatus};
use slipway_runtime::MockContainerRuntime;
use tempfile::TempDir;
use uuid::Uuid;

fn nodejs_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name":"a","scripts":{"start":"node server.js"}}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("server.js"), "listen(3000)").unwrap();
    dir
}

#[tokio::test]
async fn deploy_happy_path_publishes_a_running_container() {
    let fixture = nodejs_fixture();
    let bundle = create_bundle(fixture.path()).unwrap();

    let mut mock = MockContainerRuntime::new();
    mock.expect_build_image()
        .returning(|_, tag, _| Ok(tag.to_owned()));
    mock.expect_run_container()
        .returning(|_, _, _, _, _, _| Ok("container-1".to_owned()));
    mock.expect_inspect_container().returning(|_| {
        Ok(ContainerInspection {
            status: ContainerStatus::Running,
            ports: HashMap::from([(3000, 32768)]),
            created_at: chrono::Utc::now(),
            networks: vec!["bridge".to_owned()],
        })
    });

    let orchestrator = Orchestrator::new(Arc::new(mock), DeployMode::Dev, None);
    let project_id = Uuid::new_v4();

    let info = orchestrator
        .deploy(
            project_id,
            "acme",
            "acme",
            &bundle,
            &DetectionEngine::new(),
            HashMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(info.url, "http://localhost:32768");
    assert_eq!(info.container_id, "container-1");
    assert_eq!(orchestrator.registry().len(), 1);
    assert!(orchestrator.registry().get(project_id).is_some());
}

#[tokio::test]
async fn build_failure_surfaces_as_build_category_error() {
    let fixture = nodejs_fixture();
    let bundle = create_bundle(fixture.path()).unwrap();

    let mut mock = MockContainerRuntime::new();
    mock.expect_build_image().returning(|_, _, _| {
        Err(slipway_runtime::RuntimeError::Build {
            message: "exit code 1".to_owned(),
            log_tail: "...last lines...".to_owned(),
        })
    });

    let orchestrator = Orchestrator::new(Arc::new(mock), DeployMode::Dev, None);

    let result = orchestrator
        .deploy(
            Uuid::new_v4(),
            "acme",
            "acme",
            &bundle,
            &DetectionEngine::new(),
            HashMap::new(),
        )
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.category, ErrorCategory::Build);
    assert!(err.failure_reason().starts_with("build:"));
}

#[tokio::test]
async fn zero_byte_bundle_fails_at_extraction() {
    let mut mock = MockContainerRuntime::new();
    mock.expect_build_image().times(0);

    let orchestrator = Orchestrator::new(Arc::new(mock), DeployMode::Dev, None);
    let result = orchestrator
        .deploy(
            Uuid::new_v4(),
            "acme",
            "acme",
            &[],
            &DetectionEngine::new(),
            HashMap::new(),
        )
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.category, ErrorCategory::Extraction);
}

#[tokio::test]
async fn prod_mode_requires_base_domain() {
    let fixture = nodejs_fixture();
    let bundle = create_bundle(fixture.path()).unwrap();

    let mut mock = MockContainerRuntime::new();
    mock.expect_build_image().returning(|_, tag, _| Ok(tag.to_owned()));
    mock.expect_run_container()
        .returning(|_, _, _, _, _, _| Ok("container-1".to_owned()));
    mock.expect_inspect_container().returning(|_| {
        Ok(ContainerInspection {
            status: ContainerStatus::Running,
            ports: HashMap::from([(3000, 32768)]),
            created_at: chrono::Utc::now(),
            networks: vec![],
        })
    });

    let orchestrator = Orchestrator::new(Arc::new(mock), DeployMode::Prod, None);
    let result = orchestrator
        .deploy(
            Uuid::new_v4(),
            "acme",
            "acme",
            &bundle,
            &DetectionEngine::new(),
            HashMap::new(),
        )
        .await;

    assert!(result.is_err());
}
