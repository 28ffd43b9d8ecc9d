use std::path::Path;

use slipway_core::{Config, Tech};

use crate::detectors::Detector;
use crate::error::Result;
use crate::fs_utils;

const DEFAULT_PORT: u16 = 8080;

/// Terminal fallback. Always matches — the engine guarantees every bundle
/// resolves to a Config even if every specific detector fell through.
pub struct GenericDetector;

impl Detector for GenericDetector {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn can_handle(&self, _root: &Path) -> bool {
        true
    }

    fn get_config(&self, root: &Path) -> Result<Config> {
        let has_py = has_extension(root, "py");
        let has_js = has_extension(root, "js");

        let config = if has_py && fs_utils::exists(root, "requirements.txt") {
            Config {
                tech: Tech::Python,
                build_command: Some("pip install -r requirements.txt".to_owned()),
                start_command: "python app.py".to_owned(),
                port: 8000,
                environment: std::collections::HashMap::new(),
                install_path: "/app".to_owned(),
                raw_detector: self.name().to_owned(),
            }
        } else if has_js && fs_utils::exists(root, "package.json") {
            Config {
                tech: Tech::Nodejs,
                build_command: Some("npm ci --only=production".to_owned()),
                start_command: "node index.js".to_owned(),
                port: 3000,
                environment: std::collections::HashMap::new(),
                install_path: "/app".to_owned(),
                raw_detector: self.name().to_owned(),
            }
        } else {
            Config {
                tech: Tech::Unknown,
                build_command: None,
                start_command: format!("busybox httpd -f -p {DEFAULT_PORT} -h ."),
                port: DEFAULT_PORT,
                environment: std::collections::HashMap::new(),
                install_path: "/app".to_owned(),
                raw_detector: self.name().to_owned(),
            }
        };

        Ok(config)
    }
}

fn has_extension(root: &Path, ext: &str) -> bool {
    std::fs::read_dir(root)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .any(|e| e.path().extension().and_then(|e| e.to_str()) == Some(ext))
        })
        .unwrap_or(false)
}
