pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failure mapping per §4.3: daemon-level errors are `ContainerError`,
/// build-script failures are `BuildError` and carry the tail of build
/// output (at least the last 64 lines).
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("image build failed: {message}")]
    Build { message: String, log_tail: String },

    #[error("container daemon error: {0}")]
    Container(String),

    #[error("container {0} not found")]
    NotFound(String),
}

impl RuntimeError {
    pub fn log_tail(&self) -> Option<&str> {
        match self {
            RuntimeError::Build { log_tail, .. } => Some(log_tail),
            _ => None,
        }
    }
}
