use crate::classification::Utilization;

#[derive(Debug, Clone)]
pub struct TelemetryReport {
    pub cpu_percent: f64,
    pub cpu_class: Utilization,
    pub cpu_hints: Vec<String>,
    pub memory_percent: f64,
    pub memory_used_mb: f64,
    pub memory_limit_mb: f64,
    pub memory_class: Utilization,
    pub memory_hints: Vec<String>,
    pub network_rx_bytes: u64,
    pub network_tx_bytes: u64,
    pub blkio_read_bytes: u64,
    pub blkio_write_bytes: u64,
    pub hourly_cost: f64,
}
