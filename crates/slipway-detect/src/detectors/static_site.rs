use std::path::Path;

use slipway_core::{Config, Tech};

use crate::detectors::Detector;
use crate::error::Result;
use crate::fs_utils;

const DEFAULT_PORT: u16 = 80;
const CANDIDATE_DIRS: &[&str] = &[".", "public", "dist", "build"];

pub struct StaticDetector;

impl Detector for StaticDetector {
    fn name(&self) -> &'static str {
        "static"
    }

    fn can_handle(&self, root: &Path) -> bool {
        candidate_dir(root).is_some()
    }

    fn get_config(&self, root: &Path) -> Result<Config> {
        let has_build_script = fs_utils::exists(root, "package.json")
            && fs_utils::read_json(&root.join("package.json"))
                .ok()
                .and_then(|manifest| {
                    manifest
                        .get("scripts")
                        .and_then(|s| s.get("build"))
                        .map(|_| ())
                })
                .is_some();

        let build_command = has_build_script.then(|| "npm ci && npm run build".to_owned());

        Ok(Config {
            tech: Tech::Static,
            build_command,
            // Static sites invariant: start_command may be empty.
            start_command: String::new(),
            port: DEFAULT_PORT,
            environment: std::collections::HashMap::new(),
            install_path: "/usr/share/nginx/html".to_owned(),
            raw_detector: self.name().to_owned(),
        })
    }
}

fn candidate_dir(root: &Path) -> Option<&'static str> {
    CANDIDATE_DIRS
        .iter()
        .find(|dir| root.join(dir).join("index.html").is_file())
        .copied()
}
