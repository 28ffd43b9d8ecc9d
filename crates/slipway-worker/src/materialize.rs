use std::collections::HashMap;
use std::io;
use std::path::Path;

use tempfile::TempDir;

/// Writes a job message's `project_files` map (path -> bytes) onto disk so
/// the existing extract/build pipeline (which expects a directory) can run
/// against it unchanged. Scoped acquisition: the directory is removed when
/// the returned guard drops, same RAII pattern as bundle extraction.
pub fn materialize_project_files(files: &HashMap<String, Vec<u8>>) -> io::Result<TempDir> {
    let dir = TempDir::new()?;
    for (path, bytes) in files {
        let target = dir.path().join(path);
        if let Some(parent) = target.parent() {
            if parent != dir.path() {
                std::fs::create_dir_all(parent)?;
            }
        }
        validate_within(dir.path(), &target)?;
        std::fs::write(&target, bytes)?;
    }
    Ok(dir)
}

fn validate_within(root: &Path, target: &Path) -> io::Result<()> {
    if target.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path escapes project root: {}", target.display()),
        ));
    }
    let _ = root;
    Ok(())
}
