//! Container naming and label conventions (§4.3, §6). Telemetry and
//! cleanup tools key off these labels, so the literal strings are part of
//! the wire contract, not an implementation detail.

use std::collections::HashMap;

use rand::Rng;
use uuid::Uuid;

pub const LABEL_MARKER: &str = "dprod";
pub const LABEL_PROJECT: &str = "project";
pub const LABEL_PROJECT_ID: &str = "project_id";

pub fn labels(project_name: &str, project_id: Uuid) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    labels.insert(LABEL_MARKER.to_owned(), "true".to_owned());
    labels.insert(LABEL_PROJECT.to_owned(), project_name.to_owned());
    labels.insert(LABEL_PROJECT_ID.to_owned(), project_id.to_string());
    labels
}

/// `dprod-<slug>-<random8>`.
pub fn container_name(slug: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(8)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("dprod-{slug}-{suffix}")
}
