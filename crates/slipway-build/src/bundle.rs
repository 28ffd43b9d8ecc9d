//! Extraction of a submitted gzip-tar bundle into a fresh temporary build
//! context (Orchestrator step 1). The returned [`tempfile::TempDir`] is a
//! scoped acquisition: it is removed on drop regardless of which exit path
//! the caller takes, satisfying the "guaranteed release on all exit paths"
//! requirement.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tempfile::TempDir;

use crate::error::BundleError;

/// Extracts `bundle` (gzip-compressed tar bytes) into a freshly created
/// temporary directory and returns it. A zero-byte or malformed archive
/// yields [`BundleError::Extraction`].
pub fn extract_bundle(bundle: &[u8]) -> Result<TempDir, BundleError> {
    let dir = TempDir::new().map_err(|e| BundleError::Create { source: e })?;

    let decoder = GzDecoder::new(bundle);
    let mut archive = Archive::new(decoder);

    archive
        .unpack(dir.path())
        .map_err(|e| BundleError::Extraction(e.to_string()))?;

    Ok(dir)
}

/// Builds an in-memory gzip-tar of `root`, mirroring what a control plane
/// would produce for a submission — used by tests and by the CLI's
/// local-mode deploy path.
pub fn create_bundle(root: &Path) -> Result<Vec<u8>, BundleError> {
    let mut buffer = Vec::new();
    {
        let encoder = flate2::write::GzEncoder::new(&mut buffer, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder
            .append_dir_all(".", root)
            .map_err(|e| BundleError::Extraction(e.to_string()))?;
        builder
            .into_inner()
            .map_err(|e| BundleError::Extraction(e.to_string()))?
            .finish()
            .map_err(|e| BundleError::Extraction(e.to_string()))?;
    }
    Ok(buffer)
}

pub fn read_file_bytes(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}
