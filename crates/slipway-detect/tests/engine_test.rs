use std::fs;

use proptest::prelude::*;
use slipway_core::Tech;
use slipway_detect::DetectionEngine;
use tempfile::TempDir;

fn write(dir: &TempDir, path: &str, content: &str) {
    let full = dir.path().join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

/// S1: Node app, happy path.
#[test]
fn detects_nodejs_happy_path() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "package.json",
        r#"{"name":"a","scripts":{"start":"node server.js"}}"#,
    );
    write(&dir, "server.js", "require('http').createServer().listen(3000);");

    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_eq!(config.tech, Tech::Nodejs);
    assert_eq!(config.build_command.as_deref(), Some("npm ci --only=production"));
    assert_eq!(config.start_command, "node server.js");
    assert_eq!(config.port, 3000);
}

/// S2: Python FastAPI.
#[test]
fn detects_python_fastapi() {
    let dir = TempDir::new().unwrap();
    write(&dir, "requirements.txt", "fastapi==0.110.0\nuvicorn==0.27.0\n");
    write(&dir, "main.py", "app = None\n");

    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_eq!(config.tech, Tech::Python);
    assert_eq!(
        config.build_command.as_deref(),
        Some("pip install -r requirements.txt")
    );
    assert_eq!(config.start_command, "uvicorn main:app --host 0.0.0.0 --port 8000");
    assert_eq!(config.port, 8000);
}

/// S3: Go, single main.
#[test]
fn detects_go_single_main() {
    let dir = TempDir::new().unwrap();
    write(&dir, "go.mod", "module example.com/app\n\ngo 1.21\n");
    write(&dir, "main.go", "package main\nfunc main() {}\n");

    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_eq!(config.tech, Tech::Go);
    assert_eq!(config.build_command.as_deref(), Some("go mod download"));
    assert_eq!(config.start_command, "go run main.go");
    assert_eq!(config.port, 8080);
}

/// S4: Static site in dist/.
#[test]
fn detects_static_site_in_dist() {
    let dir = TempDir::new().unwrap();
    write(&dir, "dist/index.html", "<html></html>");

    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_eq!(config.tech, Tech::Static);
    assert_eq!(config.port, 80);
    assert!(config.is_valid());
}

/// S5: malformed package.json falls through to generic.
#[test]
fn malformed_nodejs_manifest_falls_through_to_generic() {
    let dir = TempDir::new().unwrap();
    write(&dir, "package.json", "{ not valid json");

    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_ne!(config.tech, Tech::Nodejs);
}

const DETERMINISM_FILES: [(&str, &str); 5] = [
    ("go.mod", "module x\n"),
    ("go.sum", ""),
    ("cmd/api/main.go", "package main\nfunc main() {}\n"),
    ("cmd/worker/main.go", "package main\nfunc main() {}\n"),
    ("README.md", "hello\n"),
];

fn write_in_order(dir: &TempDir, order: &[usize]) {
    for &i in order {
        let (path, content) = DETERMINISM_FILES[i];
        write(dir, path, content);
    }
}

proptest! {
    /// Invariant: detection is deterministic regardless of the order the
    /// same set of files is written in (filesystem creation order carries
    /// no signal, only path/content do).
    #[test]
    fn detection_is_deterministic_across_creation_orders(seed in prop::collection::vec(any::<u8>(), DETERMINISM_FILES.len())) {
        let mut shuffled: Vec<usize> = (0..DETERMINISM_FILES.len()).collect();
        shuffled.sort_by_key(|&i| seed[i]);

        let reference_dir = TempDir::new().unwrap();
        write_in_order(&reference_dir, &(0..DETERMINISM_FILES.len()).collect::<Vec<_>>());
        let reference = DetectionEngine::new().detect(reference_dir.path()).unwrap();

        let shuffled_dir = TempDir::new().unwrap();
        write_in_order(&shuffled_dir, &shuffled);
        let shuffled_config = DetectionEngine::new().detect(shuffled_dir.path()).unwrap();

        prop_assert_eq!(reference.tech, shuffled_config.tech);
        prop_assert_eq!(reference.build_command, shuffled_config.build_command);
        prop_assert_eq!(reference.start_command, shuffled_config.start_command);
        prop_assert_eq!(reference.port, shuffled_config.port);
    }
}

/// Round-trip: any tree with a reachable index.html maps to static,
/// regardless of which supported subdirectory holds it.
#[test]
fn static_detection_covers_all_known_subdirectories() {
    for subdir in ["public", "dist", "build"] {
        let dir = TempDir::new().unwrap();
        write(&dir, &format!("{subdir}/index.html"), "<html></html>");
        let config = DetectionEngine::new().detect(dir.path()).unwrap();
        assert_eq!(config.tech, Tech::Static, "subdir {subdir} should resolve to static");
    }
}

/// Boundary: package.json missing scripts.start and main falls back to
/// `node index.js`.
#[test]
fn nodejs_without_start_script_or_main_defaults_to_index_js() {
    let dir = TempDir::new().unwrap();
    write(&dir, "package.json", r#"{"name":"a"}"#);

    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_eq!(config.tech, Tech::Nodejs);
    assert_eq!(config.start_command, "node index.js");
}

/// generic always matches when nothing else does.
#[test]
fn generic_always_matches_empty_tree() {
    let dir = TempDir::new().unwrap();
    let config = DetectionEngine::new().detect(dir.path()).unwrap();
    assert_eq!(config.tech, Tech::Unknown);
}
