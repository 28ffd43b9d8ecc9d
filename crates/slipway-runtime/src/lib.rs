//! Container Runtime Adapter (C5): a thin interface over the container
//! daemon — build, run, inspect, logs, stop, remove, stats.

pub mod bollard_runtime;
pub mod error;
pub mod labels;
pub mod stats;
mod tarball;
pub mod trait_def;

pub use bollard_runtime::BollardRuntime;
pub use error::{Result, RuntimeError};
pub use stats::StatsSnapshot;
pub use trait_def::{ContainerInspection, ContainerRuntime, ContainerStatus, ResourceLimits};

#[cfg(any(test, feature = "test-util"))]
pub use trait_def::MockContainerRuntime;
