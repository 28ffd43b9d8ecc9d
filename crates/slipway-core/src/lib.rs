//! Shared types, error taxonomy, and environment settings for the
//! deployment pipeline: `Project`, `Deployment`, `Config`, `JobMessage`,
//! `ContainerRecord`, and the optional advisory hook.

pub mod advisory;
pub mod error;
pub mod model;
pub mod settings;

pub use advisory::{Advisor, AdvisoryContext, NullAdvisor};
pub use error::{Error, Result};
pub use model::{
    BuildLogEntry, Config, ContainerRecord, Deployment, DeploymentStatus, JobMessage, Project,
    ProjectStatus, Tech,
};
pub use settings::{DeployMode, QueueSettings, RuntimeSettings, StoreSettings, WorkerSettings};
