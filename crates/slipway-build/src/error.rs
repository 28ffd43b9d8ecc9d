#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("failed to create temporary extraction directory")]
    Create { source: std::io::Error },

    #[error("extraction failed: {0}")]
    Extraction(String),
}
