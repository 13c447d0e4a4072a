//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and rejected intents so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, ExecuteError, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine refused the intent. The advisory, if any, is already in the
    /// status message.
    #[error(transparent)]
    Rejected(#[from] ExecuteError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("world places entities on impassable cells: {0:?}")]
    InvalidWorld(Vec<String>),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

impl RuntimeError {
    /// The engine error behind a rejected intent.
    pub fn rejection(&self) -> Option<&ExecuteError> {
        match self {
            RuntimeError::Rejected(error) => Some(error),
            _ => None,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Rejected(error) => error.severity(),
            RuntimeError::InvalidWorld(_) | RuntimeError::InvalidConfig { .. } => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_failures_are_fatal() {
        assert_eq!(
            RuntimeError::CommandChannelClosed.severity(),
            ErrorSeverity::Fatal
        );
        assert!(RuntimeError::CommandChannelClosed.severity().is_internal());
        assert_eq!(
            RuntimeError::InvalidConfig {
                key: "ENEMY_TURN_DELAY_MS",
                value: "soon".into(),
            }
            .severity(),
            ErrorSeverity::Validation
        );
        assert!(RuntimeError::CommandChannelClosed.rejection().is_none());
    }
}
