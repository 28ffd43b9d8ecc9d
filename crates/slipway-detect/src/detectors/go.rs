use std::path::Path;

use slipway_core::{Config, Tech};
use walkdir::WalkDir;

use crate::detectors::Detector;
use crate::error::Result;
use crate::fs_utils;

const DEFAULT_PORT: u16 = 8080;

pub struct GoDetector;

impl Detector for GoDetector {
    fn name(&self) -> &'static str {
        "go"
    }

    fn can_handle(&self, root: &Path) -> bool {
        fs_utils::exists(root, "go.mod") || fs_utils::exists(root, "go.sum")
    }

    fn get_config(&self, root: &Path) -> Result<Config> {
        let entry = entry_file(root);

        let mut environment = std::collections::HashMap::new();
        environment.insert("CGO_ENABLED".to_owned(), "0".to_owned());

        Ok(Config {
            tech: Tech::Go,
            build_command: Some("go mod download".to_owned()),
            start_command: format!("go run {entry}"),
            port: DEFAULT_PORT,
            environment,
            install_path: "/app".to_owned(),
            raw_detector: self.name().to_owned(),
        })
    }
}

/// `main.go`, then `cmd/<subdir>/main.go`, then `app.go`/`server.go`.
fn entry_file(root: &Path) -> String {
    if fs_utils::exists(root, "main.go") {
        return "main.go".to_owned();
    }

    let mut subdirs: Vec<_> = WalkDir::new(root.join("cmd"))
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    subdirs.sort();
    for subdir in subdirs {
        let candidate = format!("cmd/{subdir}/main.go");
        if fs_utils::exists(root, &candidate) {
            return candidate;
        }
    }

    if fs_utils::exists(root, "app.go") {
        return "app.go".to_owned();
    }
    if fs_utils::exists(root, "server.go") {
        return "server.go".to_owned();
    }

    "main.go".to_owned()
}
