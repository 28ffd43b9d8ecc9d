use std::sync::Arc;

use slipway_core::RuntimeSettings;
use slipway_runtime::BollardRuntime;
use slipway_telemetry::TelemetrySampler;

/// Default cost band; overridable via `UNIT_PRICE_PER_GB_HOUR` since it has
/// no natural default the way the resource limits in §4.3 do.
const DEFAULT_UNIT_PRICE_PER_GB_HOUR: f64 = 0.01;

pub async fn telemetry(container_id: &str) -> anyhow::Result<()> {
    let settings = RuntimeSettings::from_env()?;
    let runtime = Arc::new(BollardRuntime::connect(&settings.docker_socket)?);

    let unit_price = std::env::var("UNIT_PRICE_PER_GB_HOUR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_UNIT_PRICE_PER_GB_HOUR);

    let sampler = TelemetrySampler::new(runtime, unit_price);
    let report = sampler.sample(container_id).await?;

    println!("cpu       {:.1}% ({:?})", report.cpu_percent, report.cpu_class);
    for hint in &report.cpu_hints {
        println!("          - {hint}");
    }
    println!(
        "memory    {:.1}% ({:?}) — {:.0}MB / {:.0}MB",
        report.memory_percent, report.memory_class, report.memory_used_mb, report.memory_limit_mb
    );
    for hint in &report.memory_hints {
        println!("          - {hint}");
    }
    println!("network   rx {}B tx {}B", report.network_rx_bytes, report.network_tx_bytes);
    println!("blkio     read {}B write {}B", report.blkio_read_bytes, report.blkio_write_bytes);
    println!("cost      ${:.4}/hr", report.hourly_cost);

    Ok(())
}
