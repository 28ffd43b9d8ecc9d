use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error taxonomy shared across the pipeline.
///
/// Narrow, per-crate error enums (`slipway_detect::DetectError`,
/// `slipway_build::BundleError`, ...) are folded into this taxonomy via
/// `From` impls at the orchestrator/worker boundary, where a deployment's
/// `failure_reason` is recorded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No detector (including `generic`) could produce a Config. Reserved —
    /// `generic` always matches, so this should be unreachable in practice.
    #[error("detection failed: {0}")]
    Detection(String),

    /// The submitted archive is not a valid gzip-tar, or extraction failed.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Image build failed; carries the tail of build output.
    #[error("build failed: {message}")]
    Build { message: String, log_tail: String },

    /// Container start or inspect failed.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Queue receive/delete/send failed. Retryable by the poll loop.
    #[error("queue error: {0}")]
    Queue(String),

    /// Database write failed. Retryable with exponential backoff.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Per-step deadline exceeded.
    #[error("timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("failed to read config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing required environment variable {0}")]
    MissingEnv(String),

    #[error("invalid value for environment variable {name}: {value}")]
    InvalidEnv { name: String, value: String },
}

impl Error {
    /// The short category prefix used in `failure_reason` (`category:message`),
    /// matching the `BuildError`/`RuntimeError`/... taxonomy of the wire format.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Detection(_) => "detection",
            Error::Extraction(_) => "extraction",
            Error::Build { .. } => "build",
            Error::Runtime(_) => "runtime",
            Error::Queue(_) => "queue",
            Error::Persistence(_) => "persistence",
            Error::Timeout(_) => "timeout",
            Error::ConfigLoad { .. } | Error::MissingEnv(_) | Error::InvalidEnv { .. } => "config",
        }
    }

    /// Errors that must not be acked — the queue should redeliver rather
    /// than have the worker record a terminal `failed` state.
    pub fn is_retryable_without_ack(&self) -> bool {
        matches!(self, Error::Queue(_) | Error::Persistence(_))
    }
}
