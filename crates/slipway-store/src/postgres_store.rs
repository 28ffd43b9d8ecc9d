use async_trait::async_trait;
use slipway_core::{BuildLogEntry, Deployment, DeploymentStatus, StoreSettings};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::trait_def::DeploymentStore;

/// Production `DeploymentStore` backed by Postgres. Two tables: `deployments`
/// holds the current row per §3's Deployment attributes, `deployment_logs`
/// is insert-only (§4.6 "build logs are append-only") — nothing in this
/// module issues an `UPDATE` or `DELETE` against it.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(settings: &StoreSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&settings.database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_logs(&self, id: Uuid) -> Result<Vec<BuildLogEntry>> {
        let rows = sqlx::query(
            "SELECT timestamp, message, worker_id FROM deployment_logs \
             WHERE deployment_id = $1 ORDER BY timestamp ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut logs = Vec::with_capacity(rows.len());
        for row in rows {
            logs.push(BuildLogEntry {
                timestamp: row.try_get("timestamp")?,
                message: row.try_get("message")?,
                worker_id: row.try_get("worker_id")?,
            });
        }
        Ok(logs)
    }

    fn deployment_from_row(row: &sqlx::postgres::PgRow, logs: Vec<BuildLogEntry>) -> Result<Deployment> {
        let status_text: String = row.try_get("status")?;
        Ok(Deployment {
            id: row.try_get("id")?,
            project_id: row.try_get("project_id")?,
            status: status_from_db(&status_text),
            container_id: row.try_get("container_id")?,
            image_id: row.try_get("image_id")?,
            url: row.try_get("url")?,
            logs,
            failure_reason: row.try_get("failure_reason")?,
            created_at: row.try_get("created_at")?,
            build_started_at: row.try_get("build_started_at")?,
            build_completed_at: row.try_get("build_completed_at")?,
            deployed_at: row.try_get("deployed_at")?,
            failed_at: row.try_get("failed_at")?,
            stopped_at: row.try_get("stopped_at")?,
        })
    }
}

fn status_to_db(status: DeploymentStatus) -> &'static str {
    match status {
        DeploymentStatus::Queued => "queued",
        DeploymentStatus::Building => "building",
        DeploymentStatus::Deploying => "deploying",
        DeploymentStatus::Running => "running",
        DeploymentStatus::Failed => "failed",
        DeploymentStatus::Stopped => "stopped",
    }
}

fn status_from_db(status: &str) -> DeploymentStatus {
    match status {
        "building" => DeploymentStatus::Building,
        "deploying" => DeploymentStatus::Deploying,
        "running" => DeploymentStatus::Running,
        "failed" => DeploymentStatus::Failed,
        "stopped" => DeploymentStatus::Stopped,
        _ => DeploymentStatus::Queued,
    }
}

#[async_trait]
impl DeploymentStore for PostgresStore {
    async fn create(&self, project_id: Uuid) -> Result<Deployment> {
        let deployment = Deployment::new(project_id);
        sqlx::query(
            "INSERT INTO deployments (id, project_id, status, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(deployment.id)
        .bind(project_id)
        .bind(status_to_db(deployment.status))
        .bind(deployment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(deployment)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Deployment>> {
        let row = sqlx::query(
            "SELECT id, project_id, status, container_id, image_id, url, failure_reason, \
             created_at, build_started_at, build_completed_at, deployed_at, failed_at, stopped_at \
             FROM deployments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let logs = self.fetch_logs(id).await?;
                Ok(Some(Self::deployment_from_row(&row, logs)?))
            }
            None => Ok(None),
        }
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Deployment>> {
        let rows = sqlx::query(
            "SELECT id, project_id, status, container_id, image_id, url, failure_reason, \
             created_at, build_started_at, build_completed_at, deployed_at, failed_at, stopped_at \
             FROM deployments WHERE project_id = $1 ORDER BY created_at DESC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        let mut deployments = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: Uuid = row.try_get("id")?;
            let logs = self.fetch_logs(id).await?;
            deployments.push(Self::deployment_from_row(row, logs)?);
        }
        Ok(deployments)
    }

    async fn mark_building(&self, id: Uuid, worker_id: &str) -> Result<()> {
        sqlx::query(
            "UPDATE deployments SET status = 'building', build_started_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        self.append_log(id, "build started", worker_id).await
    }

    async fn mark_deploying(&self, id: Uuid, image_id: &str, worker_id: &str) -> Result<()> {
        sqlx::query(
            "UPDATE deployments SET status = 'deploying', image_id = $2, \
             build_completed_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(image_id)
        .execute(&self.pool)
        .await?;
        let short = &image_id[..image_id.len().min(12)];
        self.append_log(id, &format!("image built {short}"), worker_id).await
    }

    async fn mark_running(&self, id: Uuid, container_id: &str, url: &str) -> Result<()> {
        sqlx::query(
            "UPDATE deployments SET status = 'running', container_id = $2, url = $3, \
             deployed_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(container_id)
        .bind(url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, reason: &str) -> Result<()> {
        sqlx::query(
            "UPDATE deployments SET status = 'failed', failure_reason = $2, failed_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(reason)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_stopped(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE deployments SET status = 'stopped', stopped_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn append_log(&self, id: Uuid, message: &str, worker_id: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO deployment_logs (deployment_id, timestamp, message, worker_id) \
             VALUES ($1, now(), $2, $3)",
        )
        .bind(id)
        .bind(message)
        .bind(worker_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
