/// Fixed utilization bands (§4.7). CPU: low&lt;10, 10..=80 optimal, &gt;80
/// high. Memory: low&lt;30, 30..=85 optimal, &gt;85 high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utilization {
    Low,
    Optimal,
    High,
}

pub fn classify_cpu(percent: f64) -> Utilization {
    if percent < 10.0 {
        Utilization::Low
    } else if percent <= 80.0 {
        Utilization::Optimal
    } else {
        Utilization::High
    }
}

pub fn classify_memory(percent: f64) -> Utilization {
    if percent < 30.0 {
        Utilization::Low
    } else if percent <= 85.0 {
        Utilization::Optimal
    } else {
        Utilization::High
    }
}
