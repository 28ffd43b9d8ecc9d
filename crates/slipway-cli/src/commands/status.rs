use slipway_core::StoreSettings;
use slipway_store::{DeploymentStore, PostgresStore};
use uuid::Uuid;

pub async fn status(deployment_id: Uuid) -> anyhow::Result<()> {
    let settings = StoreSettings::from_env()?;
    let store = PostgresStore::connect(&settings).await?;

    let deployment = store
        .get(deployment_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no deployment with id {deployment_id}"))?;

    println!("deployment   {}", deployment.id);
    println!("project      {}", deployment.project_id);
    println!("status       {:?}", deployment.status);
    if let Some(url) = &deployment.url {
        println!("url          {url}");
    }
    if let Some(container_id) = &deployment.container_id {
        println!("container    {container_id}");
    }
    if let Some(image_id) = &deployment.image_id {
        println!("image        {image_id}");
    }
    if let Some(reason) = &deployment.failure_reason {
        println!("failure      {reason}");
    }

    if !deployment.logs.is_empty() {
        println!();
        println!("log:");
        for entry in &deployment.logs {
            println!("  [{}] {} ({})", entry.timestamp, entry.message, entry.worker_id);
        }
    }

    Ok(())
}
