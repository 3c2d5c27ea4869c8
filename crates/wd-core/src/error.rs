use thiserror::Error;

/// Top-level error type for the wd-core crate and dependents.
#[derive(Debug, Error)]
pub enum WdError {
    /// The edit-script backend produced an operation stream that does not
    /// walk both token sequences end to end.
    #[error("diff failed: {0}")]
    DiffFailed(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, WdError>;
