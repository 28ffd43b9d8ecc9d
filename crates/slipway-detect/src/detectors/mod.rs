mod generic;
mod go;
mod nodejs;
mod python;
mod static_site;

pub use generic::GenericDetector;
pub use go::GoDetector;
pub use nodejs::NodejsDetector;
pub use python::PythonDetector;
pub use static_site::StaticDetector;

use std::path::Path;

use slipway_core::Config;

use crate::error::Result;

/// Capability set every framework detector implements (C2). The ordered
/// list of detectors is data, not control flow — see [`crate::engine::DetectionEngine`].
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, root: &Path) -> bool;

    /// Only called after `can_handle` returned true. May still fail on a
    /// malformed manifest; the engine treats that as a fall-through, not
    /// a job failure.
    fn get_config(&self, root: &Path) -> Result<Config>;
}
