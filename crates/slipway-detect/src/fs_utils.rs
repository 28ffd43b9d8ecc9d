//! Detector primitives (C1): file presence checks, JSON parsing, and
//! dependency-set inspection shared by all framework detectors.

use std::path::{Path, PathBuf};

use crate::error::{DetectError, Result};

/// First existing candidate among `names`, relative to `root`. Lexically
/// ordered by the caller's `names` list, not filesystem iteration order —
/// keeps detection a pure function of path/content.
pub fn first_existing(root: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

pub fn exists(root: &Path, name: &str) -> bool {
    root.join(name).is_file()
}

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DetectError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| DetectError::MalformedManifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// True if any line of `content` contains `needle` (case-sensitive),
/// used to scan `requirements.txt`-style flat dependency lists.
pub fn contains_dependency(content: &str, needle: &str) -> bool {
    content
        .lines()
        .any(|line| line.trim_start().to_lowercase().starts_with(&needle.to_lowercase()))
}
