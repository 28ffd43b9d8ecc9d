use std::path::Path;

use slipway_core::Config;

use crate::detectors::{Detector, GenericDetector, GoDetector, NodejsDetector, PythonDetector, StaticDetector};
use crate::error::{DetectError, Result};

/// Orders detectors and runs first-match dispatch (C3). The ordered list
/// is fixed: more specific signatures before weaker ones; `static` before
/// the terminal `generic` because an HTML file may coexist with a
/// framework's own manifest.
pub struct DetectionEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self {
            detectors: vec![
                Box::new(NodejsDetector),
                Box::new(PythonDetector),
                Box::new(GoDetector),
                Box::new(StaticDetector),
                Box::new(GenericDetector),
            ],
        }
    }
}

impl DetectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// First detector that reports `can_handle = true` wins; a detector
    /// that errors while building its config is logged and skipped, not
    /// surfaced as a job failure — `generic` always matches, so this
    /// never returns `DetectError::NoMatch` in practice.
    pub fn detect(&self, root: &Path) -> Result<Config> {
        for detector in &self.detectors {
            if !detector.can_handle(root) {
                continue;
            }

            match detector.get_config(root) {
                Ok(config) => return Ok(config),
                Err(err) => {
                    tracing::warn!(
                        detector = detector.name(),
                        error = %err,
                        "detector matched but failed to produce a config, falling through"
                    );
                    continue;
                }
            }
        }

        Err(DetectError::NoMatch)
    }
}
