pub type Result<T> = std::result::Result<T, DeploymentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Extraction,
    Detection,
    Build,
    Runtime,
}

#[derive(Debug, thiserror::Error)]
#[error("{category:?}: {message}")]
pub struct DeploymentError {
    pub category: ErrorCategory,
    pub message: String,
    pub log_tail: Option<String>,
}

impl DeploymentError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Extraction,
            message: message.into(),
            log_tail: None,
        }
    }

    pub fn detection(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Detection,
            message: message.into(),
            log_tail: None,
        }
    }

    pub fn build(message: impl Into<String>, log_tail: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Build,
            message: message.into(),
            log_tail: Some(log_tail.into()),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::Runtime,
            message: message.into(),
            log_tail: None,
        }
    }

    /// `<category>:<message>` — the `failure_reason` format §7 specifies.
    pub fn failure_reason(&self) -> String {
        let category = match self.category {
            ErrorCategory::Extraction => "extraction",
            ErrorCategory::Detection => "detection",
            ErrorCategory::Build => "build",
            ErrorCategory::Runtime => "runtime",
        };
        format!("{category}:{}", self.message)
    }
}

impl From<slipway_build::BundleError> for DeploymentError {
    fn from(err: slipway_build::BundleError) -> Self {
        DeploymentError::extraction(err.to_string())
    }
}

impl From<slipway_detect::DetectError> for DeploymentError {
    fn from(err: slipway_detect::DetectError) -> Self {
        DeploymentError::detection(err.to_string())
    }
}

impl From<slipway_runtime::RuntimeError> for DeploymentError {
    fn from(err: slipway_runtime::RuntimeError) -> Self {
        match &err {
            slipway_runtime::RuntimeError::Build { message, log_tail } => {
                DeploymentError::build(message.clone(), log_tail.clone())
            }
            other => DeploymentError::runtime(other.to_string()),
        }
    }
}
