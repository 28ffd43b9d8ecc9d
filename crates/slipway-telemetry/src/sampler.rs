use std::sync::Arc;

use slipway_runtime::{ContainerRuntime, RuntimeError};

use crate::classification::{classify_cpu, classify_memory};
use crate::cost::hourly_cost;
use crate::hints::{cpu_hints, memory_hints};
use crate::report::TelemetryReport;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Telemetry Sampler (C10): takes a single stats snapshot for a live
/// container and derives utilization class, hints, and cost band (§4.7).
pub struct TelemetrySampler {
    runtime: Arc<dyn ContainerRuntime>,
    unit_price_per_gb_hour: f64,
}

impl TelemetrySampler {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, unit_price_per_gb_hour: f64) -> Self {
        Self {
            runtime,
            unit_price_per_gb_hour,
        }
    }

    pub async fn sample(&self, container_id: &str) -> Result<TelemetryReport, RuntimeError> {
        let snapshot = self.runtime.stats(container_id).await?;

        let cpu_percent = snapshot.cpu_percent();
        let memory_percent = snapshot.memory_percent();
        let cpu_class = classify_cpu(cpu_percent);
        let memory_class = classify_memory(memory_percent);

        Ok(TelemetryReport {
            cpu_percent,
            cpu_class,
            cpu_hints: cpu_hints(cpu_class, cpu_percent),
            memory_percent,
            memory_used_mb: snapshot.memory_used_bytes as f64 / BYTES_PER_MB,
            memory_limit_mb: snapshot.memory_limit_bytes as f64 / BYTES_PER_MB,
            memory_class,
            memory_hints: memory_hints(memory_class, memory_percent),
            network_rx_bytes: snapshot.network_rx_bytes,
            network_tx_bytes: snapshot.network_tx_bytes,
            blkio_read_bytes: snapshot.blkio_read_bytes,
            blkio_write_bytes: snapshot.blkio_write_bytes,
            hourly_cost: hourly_cost(snapshot.memory_limit_bytes, self.unit_price_per_gb_hour),
        })
    }
}
