use std::path::PathBuf;
use std::sync::Arc;

use slipway_build::bundle;
use slipway_core::RuntimeSettings;
use slipway_detect::DetectionEngine;
use slipway_orchestrator::Orchestrator;
use slipway_runtime::BollardRuntime;
use uuid::Uuid;

use slipway_orchestrator::subdomain::slugify;

/// Detect, build, and run `path` as a container, bypassing the queue and
/// the deployment store entirely — useful for trying out detection and the
/// Dockerfile synthesis against a local checkout.
pub async fn deploy(path: Option<PathBuf>, subdomain: Option<String>) -> anyhow::Result<()> {
    let project_dir = path.unwrap_or_else(|| PathBuf::from("."));
    let project_dir = project_dir.canonicalize()?;

    let project_name = project_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project")
        .to_owned();
    let subdomain = subdomain.unwrap_or_else(|| slugify(&project_name));

    let runtime_settings = RuntimeSettings::from_env()?;
    let runtime = Arc::new(BollardRuntime::connect(&runtime_settings.docker_socket)?);
    let orchestrator = Orchestrator::new(runtime, slipway_core::DeployMode::Dev, None);
    let engine = DetectionEngine::new();

    eprintln!("Bundling {}...", project_dir.display());
    let tar = bundle::create_bundle(&project_dir)?;

    eprintln!("Detecting, building, and running...");
    let project_id = Uuid::new_v4();
    let info = orchestrator
        .deploy(
            project_id,
            &project_name,
            &subdomain,
            &tar,
            &engine,
            Default::default(),
        )
        .await?;

    eprintln!();
    eprintln!("Detected: {}", info.config.tech);
    eprintln!("Container: {}", info.container_id);
    eprintln!("Deployed: {}", info.url);

    Ok(())
}
