// Central Error Type for the Task Runtime

use thiserror::Error;

/// Runtime-level error type
///
/// All variants are invalid-usage failures: they propagate to the task
/// instead of being recovered locally.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TaskError {
    /// The underlying domain error, if this is one
    pub fn as_domain(&self) -> Option<&crate::domain::DomainError> {
        match self {
            TaskError::Domain(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias using TaskError
pub type Result<T> = std::result::Result<T, TaskError>;
