//! Deployment Orchestrator (C6): extract -> detect -> synthesize -> build ->
//! run -> inspect -> publish.

pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod subdomain;

pub use error::{DeploymentError, ErrorCategory, Result};
pub use orchestrator::{DeploymentInfo, Orchestrator};
pub use registry::ActiveDeployments;
