use crate::classification::Utilization;

/// Emits 1-3 textual hints for one dimension (CPU or memory), per §4.7.
pub fn cpu_hints(class: Utilization, percent: f64) -> Vec<String> {
    match class {
        Utilization::Low => vec![
            format!("CPU usage is low ({percent:.1}%); consider lowering the CPU quota"),
            "A smaller CPU allocation would free headroom for other deployments".to_owned(),
        ],
        Utilization::Optimal => vec![format!("CPU usage is within the optimal range ({percent:.1}%)")],
        Utilization::High => vec![
            format!("CPU usage is high ({percent:.1}%); the container may be throttled"),
            "Consider raising the CPU quota or profiling the workload for hot paths".to_owned(),
            "Sustained high CPU can delay request handling under load".to_owned(),
        ],
    }
}

pub fn memory_hints(class: Utilization, percent: f64) -> Vec<String> {
    match class {
        Utilization::Low => vec![
            format!("Memory usage is low ({percent:.1}%); the memory limit could be reduced"),
            "Lowering the memory cap frees capacity on the host".to_owned(),
        ],
        Utilization::Optimal => vec![format!("Memory usage is within the optimal range ({percent:.1}%)")],
        Utilization::High => vec![
            format!("Memory usage is high ({percent:.1}%); the container risks an OOM kill"),
            "Raise the memory limit or investigate a possible leak".to_owned(),
        ],
    }
}
