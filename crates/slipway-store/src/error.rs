pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence failures (§7 `PersistenceError`) are retryable with
/// exponential backoff by the worker's poll loop — never acked away.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("no deployment with id {0}")]
    NotFound(uuid::Uuid),
}
