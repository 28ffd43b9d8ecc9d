use std::sync::Mutex;

use slipway_core::WorkerSettings;

// Tests that mutate process environment must not run concurrently.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn worker_settings_applies_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    // SAFETY: serialized by ENV_LOCK; no other thread in this process reads
    // these variables concurrently.
    unsafe {
        std::env::set_var("WORKER_ID", "worker-test-1");
        std::env::remove_var("MAX_CONCURRENT_JOBS");
        std::env::remove_var("POLL_INTERVAL");
        std::env::remove_var("MESSAGE_VISIBILITY_TIMEOUT");
        std::env::remove_var("DEPLOY_MODE");
        std::env::remove_var("WORKER_PUBLIC_IP");
    }

    let settings = WorkerSettings::from_env().unwrap();
    assert_eq!(settings.worker_id, "worker-test-1");
    assert_eq!(settings.max_concurrent_jobs, 3);
    assert_eq!(settings.poll_interval.as_secs(), 5);
    assert_eq!(settings.message_visibility_timeout.as_secs(), 900);
    assert_eq!(settings.deploy_mode, slipway_core::DeployMode::Dev);
}

#[test]
fn worker_settings_requires_worker_id() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        std::env::remove_var("WORKER_ID");
    }

    let result = WorkerSettings::from_env();
    assert!(result.is_err());
}

#[test]
fn worker_settings_rejects_unknown_deploy_mode() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        std::env::set_var("WORKER_ID", "worker-test-2");
        std::env::set_var("DEPLOY_MODE", "staging");
    }

    let result = WorkerSettings::from_env();
    assert!(result.is_err());

    unsafe {
        std::env::remove_var("DEPLOY_MODE");
    }
}
