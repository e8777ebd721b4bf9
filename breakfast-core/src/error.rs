use thiserror::Error;

/// Failure channel for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The clock was interrupted before a pending delay completed.
    #[error("delay interrupted before completion")]
    DelayInterrupted,
    /// A step inside the task raised an error.
    #[error("task failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// Waiting for a completion on an empty task set. This is a
    /// programming error and fails fast instead of hanging forever.
    #[error("waited for a completion on an empty task set")]
    EmptyWait,
}
