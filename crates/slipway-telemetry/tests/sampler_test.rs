use std::sync::Arc;

use slipway_runtime::{MockContainerRuntime, StatsSnapshot};
use slipway_telemetry::{TelemetrySampler, Utilization};

fn snapshot(cpu_delta: f64, system_delta: f64, used: u64, limit: u64) -> StatsSnapshot {
    StatsSnapshot {
        cpu_delta,
        system_delta,
        online_cpus: 2.0,
        memory_used_bytes: used,
        memory_limit_bytes: limit,
        network_rx_bytes: 100,
        network_tx_bytes: 200,
        blkio_read_bytes: 10,
        blkio_write_bytes: 20,
    }
}

#[tokio::test]
async fn low_utilization_snapshot_classifies_low_and_hints() {
    let mut mock = MockContainerRuntime::new();
    mock.expect_stats()
        .returning(|_| Ok(snapshot(1.0, 1000.0, 100 * 1024 * 1024, 512 * 1024 * 1024)));

    let sampler = TelemetrySampler::new(Arc::new(mock), 0.01);
    let report = sampler.sample("container-1").await.unwrap();

    assert_eq!(report.cpu_class, Utilization::Low);
    assert_eq!(report.memory_class, Utilization::Low);
    assert!(!report.cpu_hints.is_empty() && report.cpu_hints.len() <= 3);
    assert!(!report.memory_hints.is_empty() && report.memory_hints.len() <= 3);
}

#[tokio::test]
async fn high_utilization_snapshot_classifies_high() {
    let mut mock = MockContainerRuntime::new();
    mock.expect_stats()
        .returning(|_| Ok(snapshot(90.0, 100.0, 500 * 1024 * 1024, 512 * 1024 * 1024)));

    let sampler = TelemetrySampler::new(Arc::new(mock), 0.01);
    let report = sampler.sample("container-1").await.unwrap();

    assert_eq!(report.cpu_class, Utilization::High);
    assert_eq!(report.memory_class, Utilization::High);
}

#[tokio::test]
async fn hourly_cost_scales_with_memory_limit() {
    let mut mock = MockContainerRuntime::new();
    mock.expect_stats()
        .returning(|_| Ok(snapshot(1.0, 100.0, 0, 1024 * 1024 * 1024)));

    let sampler = TelemetrySampler::new(Arc::new(mock), 0.05);
    let report = sampler.sample("container-1").await.unwrap();

    assert!((report.hourly_cost - 0.05).abs() < 1e-9);
}

#[tokio::test]
async fn network_and_blkio_counters_pass_through_unmodified() {
    let mut mock = MockContainerRuntime::new();
    mock.expect_stats()
        .returning(|_| Ok(snapshot(1.0, 100.0, 1, 1024)));

    let sampler = TelemetrySampler::new(Arc::new(mock), 0.0);
    let report = sampler.sample("container-1").await.unwrap();

    assert_eq!(report.network_rx_bytes, 100);
    assert_eq!(report.network_tx_bytes, 200);
    assert_eq!(report.blkio_read_bytes, 10);
    assert_eq!(report.blkio_write_bytes, 20);
}
