use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, DetectError>;

/// Detection-local errors. A detector that fails with one of these falls
/// through to the next detector in the chain — the engine logs the fault
/// but never surfaces it as a job failure (the terminal `generic` detector
/// always succeeds).
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed manifest at {path}: {message}")]
    MalformedManifest { path: PathBuf, message: String },

    /// Returned by `generic` only if somehow nothing else produces a
    /// config; reserved per spec, effectively unreachable.
    #[error("no detector could produce a config")]
    NoMatch,
}
