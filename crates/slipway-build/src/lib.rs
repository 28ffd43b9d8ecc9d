//! Bundle extraction and Dockerfile synthesis (C4 and Orchestrator step 1).
//!
//! ```text
//! Orchestrator::deploy
//!   1. Extract    ── bundle::extract_bundle() -> scoped TempDir
//!   2. Detect     ── slipway_detect::DetectionEngine (C3)
//!   3. Synthesize ── dockerfile::DockerfileGenerator::render() (C4)
//!   4. Build/Run  ── slipway_runtime (C5)
//! ```

pub mod bundle;
pub mod dockerfile;
pub mod error;

pub use dockerfile::DockerfileGenerator;
pub use error::BundleError;
