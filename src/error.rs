//! Error types for the answer-match crate.

/// Scoring error types.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// An input is longer than the configured character ceiling. Raised
    /// before any cost table is allocated.
    #[error("input too large: {len} characters (limit {limit})")]
    InputTooLarge { len: usize, limit: usize },

    /// Scorer configuration is out of range.
    #[error("invalid scorer configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for scoring operations.
pub type ScoreResult<T> = Result<T, ScoreError>;
