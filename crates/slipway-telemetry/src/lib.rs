//! Telemetry Sampler (C10): snapshots container stats, derives utilization
//! class and optimization hints (§4.7).

pub mod classification;
pub mod cost;
pub mod hints;
pub mod report;
pub mod sampler;

pub use classification::{classify_cpu, classify_memory, Utilization};
pub use report::TelemetryReport;
pub use sampler::TelemetrySampler;
