use super::enums::RunStatus;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by run transitions and queue operations.
///
/// These mark programmer errors the UI is expected to prevent by gating
/// affordances; the run snapshot is left untouched when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested lifecycle transition is not valid from the run's status
    #[error("cannot {action} a {status:?} run")]
    InvalidTransition {
        action: &'static str,
        status: RunStatus,
    },
    /// No task with the given ID exists in the run
    #[error("task {id} not found in run")]
    TaskNotFound { id: Uuid },
    /// The task exists but is active, completed, or skipped
    #[error("task {id} cannot be moved")]
    TaskNotMovable { id: Uuid },
}

/// Result type alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;
