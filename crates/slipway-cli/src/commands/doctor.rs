use slipway_core::{QueueSettings, RuntimeSettings, StoreSettings};
use slipway_runtime::BollardRuntime;
use slipway_store::PostgresStore;

struct CheckResult {
    label: &'static str,
    ok: bool,
    detail: String,
}

impl CheckResult {
    fn ok(label: &'static str, detail: impl Into<String>) -> Self {
        Self { label, ok: true, detail: detail.into() }
    }

    fn fail(label: &'static str, detail: impl Into<String>) -> Self {
        Self { label, ok: false, detail: detail.into() }
    }
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.ok { "ok" } else { "fail" };
        write!(f, "  [{mark}] {}: {}", self.label, self.detail)
    }
}

/// Checks Docker socket, database, and queue reachability (worker
/// readiness, §9 open question #2).
pub async fn doctor() -> anyhow::Result<()> {
    let checks = vec![
        check_docker().await,
        check_database().await,
        check_queue().await,
    ];

    println!();
    println!("slipway doctor");
    for check in &checks {
        println!("{check}");
    }
    println!();

    if checks.iter().any(|c| !c.ok) {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}

async fn check_docker() -> CheckResult {
    let settings = match RuntimeSettings::from_env() {
        Ok(s) => s,
        Err(e) => return CheckResult::fail("docker", e.to_string()),
    };

    match BollardRuntime::connect(&settings.docker_socket) {
        Ok(runtime) => match runtime.ping().await {
            Ok(()) => CheckResult::ok("docker", settings.docker_socket),
            Err(e) => CheckResult::fail("docker", e.to_string()),
        },
        Err(e) => CheckResult::fail("docker", e.to_string()),
    }
}

async fn check_database() -> CheckResult {
    let settings = match StoreSettings::from_env() {
        Ok(s) => s,
        Err(e) => return CheckResult::fail("database", e.to_string()),
    };

    match PostgresStore::connect(&settings).await {
        Ok(_) => CheckResult::ok("database", "connected"),
        Err(e) => CheckResult::fail("database", e.to_string()),
    }
}

async fn check_queue() -> CheckResult {
    match QueueSettings::from_env() {
        Ok(settings) => CheckResult::ok("queue", format!("{} ({})", settings.queue_url, settings.aws_region)),
        Err(e) => CheckResult::fail("queue", e.to_string()),
    }
}
