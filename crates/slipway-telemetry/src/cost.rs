/// Simple cost band: `memory_limit_gb * unit_price_per_gb_hour` (§4.7). The
/// unit price is configuration — callers pass their own rate.
pub fn hourly_cost(memory_limit_bytes: u64, unit_price_per_gb_hour: f64) -> f64 {
    let gb = memory_limit_bytes as f64 / (1024.0 * 1024.0 * 1024.0);
    gb * unit_price_per_gb_hour
}
