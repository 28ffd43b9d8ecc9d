use std::path::Path;

use serde_json::Value;
use slipway_core::{Config, Tech};

use crate::detectors::Detector;
use crate::error::Result;
use crate::fs_utils;

const INSTALL_COMMAND: &str = "npm ci --only=production";
const DEFAULT_PORT: u16 = 3000;

pub struct NodejsDetector;

impl Detector for NodejsDetector {
    fn name(&self) -> &'static str {
        "nodejs"
    }

    fn can_handle(&self, root: &Path) -> bool {
        fs_utils::exists(root, "package.json")
    }

    fn get_config(&self, root: &Path) -> Result<Config> {
        let manifest = fs_utils::read_json(&root.join("package.json"))?;

        let scripts = manifest.get("scripts").and_then(Value::as_object);
        let dependencies = manifest.get("dependencies").and_then(Value::as_object);

        let build_command = scripts
            .and_then(|s| s.get("build"))
            .and_then(Value::as_str)
            .map(|_| format!("{INSTALL_COMMAND} && npm run build"))
            .or_else(|| Some(INSTALL_COMMAND.to_owned()));

        let is_nestjs = dependencies
            .map(|deps| deps.contains_key("@nestjs/core"))
            .unwrap_or(false);

        let start_command = if is_nestjs {
            "node dist/main".to_owned()
        } else if let Some(start) = scripts.and_then(|s| s.get("start")).and_then(Value::as_str) {
            start.to_owned()
        } else {
            let main = manifest
                .get("main")
                .and_then(Value::as_str)
                .unwrap_or("index.js");
            format!("node {main}")
        };

        let port = detect_port(&manifest, scripts).unwrap_or(DEFAULT_PORT);

        let mut environment = std::collections::HashMap::new();
        environment.insert("NODE_ENV".to_owned(), "production".to_owned());
        environment.insert("PORT".to_owned(), port.to_string());

        Ok(Config {
            tech: Tech::Nodejs,
            build_command,
            start_command,
            port,
            environment,
            install_path: "/app".to_owned(),
            raw_detector: self.name().to_owned(),
        })
    }
}

/// Port comes from, in priority order: a top-level `dprod.port`, a
/// `--port N` flag embedded in any script, or a top-level `port` field.
fn detect_port(
    manifest: &Value,
    scripts: Option<&serde_json::Map<String, Value>>,
) -> Option<u16> {
    if let Some(port) = manifest
        .get("dprod")
        .and_then(|d| d.get("port"))
        .and_then(Value::as_u64)
    {
        return Some(port as u16);
    }

    if let Some(scripts) = scripts {
        for value in scripts.values() {
            if let Some(script) = value.as_str() {
                if let Some(port) = extract_port_flag(script) {
                    return Some(port);
                }
            }
        }
    }

    manifest.get("port").and_then(Value::as_u64).map(|p| p as u16)
}

fn extract_port_flag(script: &str) -> Option<u16> {
    let mut parts = script.split_whitespace();
    while let Some(token) = parts.next() {
        if token == "--port" {
            return parts.next()?.parse().ok();
        }
    }
    None
}
