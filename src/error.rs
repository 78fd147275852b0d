//! Error taxonomy for pipeline construction. Prediction itself never fails.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RecommenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RecommenderError {
    /// A classifier cannot be fit on the given training rows
    #[error("training failed: {0}")]
    Training(String),

    /// Evaluation was asked to score an empty held-out set
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Model was fit against a different feature schema
    #[error("schema mismatch: model expects {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    /// Forest produced a class index with no label
    #[error("class index {index} outside label vocabulary of {len}")]
    LabelOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
