//! Framework detectors and the first-match detection engine (C1–C3).

pub mod detectors;
pub mod engine;
pub mod error;
pub mod fs_utils;

pub use detectors::Detector;
pub use engine::DetectionEngine;
pub use error::{DetectError, Result};
