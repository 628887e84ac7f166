/// Stash CLI error types
#[derive(Debug, thiserror::Error)]
pub enum StashError {
    /// Not invoked inside a git working tree (fatal, exit code 1)
    #[error("not a git repository (run this inside a git working tree)")]
    NotARepository,

    /// A stash reference that no longer denotes a live entry
    #[error("stash entry not found: {0}")]
    NotFound(String),

    /// The backend refused to apply a stash because of conflicts
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other failure reported by the git backend
    #[error("git command failed: {0}")]
    Backend(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup/teardown errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StashError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        StashError::Config(msg.into())
    }

    pub fn terminal<S: Into<String>>(msg: S) -> Self {
        StashError::Terminal(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        StashError::Validation(msg.into())
    }

    pub fn backend<S: Into<String>>(msg: S) -> Self {
        StashError::Backend(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StashError>;
