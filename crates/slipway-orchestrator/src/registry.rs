use dashmap::DashMap;
use slipway_core::ContainerRecord;
use uuid::Uuid;

/// In-memory active-deployments map (§5): project id -> container record.
/// Non-persistent across worker restart; re-derived from the container
/// runtime on boot. `DashMap` guarantees every access is a short-lived
/// guard around pure data — no I/O is ever performed while holding a
/// shard lock, by construction.
#[derive(Default)]
pub struct ActiveDeployments {
    records: DashMap<Uuid, ContainerRecord>,
}

impl ActiveDeployments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: ContainerRecord) {
        self.records.insert(record.project_id, record);
    }

    pub fn get(&self, project_id: Uuid) -> Option<ContainerRecord> {
        self.records.get(&project_id).map(|r| r.clone())
    }

    pub fn remove(&self, project_id: Uuid) -> Option<ContainerRecord> {
        self.records.remove(&project_id).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
