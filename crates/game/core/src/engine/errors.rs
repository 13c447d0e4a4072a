//! Error types for action execution pipeline.

use crate::action::{
    ActionTransition, CombatAction, CombatError, EnemyTurnAction, EquipItemAction, MoveAction,
    UseItemAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: GameError> GameError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        match self.phase {
            TransitionPhase::PreValidate => self.error.severity(),
            // Anything past validation means the rules and the state disagree.
            TransitionPhase::Apply | TransitionPhase::PostValidate => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }

    fn advisory(&self) -> Option<&'static str> {
        match self.phase {
            TransitionPhase::PreValidate => self.error.advisory(),
            TransitionPhase::Apply | TransitionPhase::PostValidate => None,
        }
    }
}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("combat action failed: {0}")]
    Combat(TransitionPhaseError<<CombatAction as ActionTransition>::Error>),

    #[error("enemy turn failed: {0}")]
    EnemyTurn(TransitionPhaseError<<EnemyTurnAction as ActionTransition>::Error>),

    #[error("use item action failed: {0}")]
    UseItem(TransitionPhaseError<<UseItemAction as ActionTransition>::Error>),

    #[error("equip item action failed: {0}")]
    EquipItem(TransitionPhaseError<<EquipItemAction as ActionTransition>::Error>),

    #[error("the game is over; reset to continue")]
    GameOver,
}

impl ExecuteError {
    fn inner(&self) -> Option<&dyn GameError> {
        let inner: &dyn GameError = match self {
            ExecuteError::Move(error) => error,
            ExecuteError::Combat(error) | ExecuteError::EnemyTurn(error) => error,
            ExecuteError::UseItem(error) | ExecuteError::EquipItem(error) => error,
            ExecuteError::GameOver => return None,
        };
        Some(inner)
    }

    /// True for an enemy turn that no longer matches the live encounter.
    pub fn is_stale_enemy_turn(&self) -> bool {
        matches!(
            self,
            ExecuteError::EnemyTurn(TransitionPhaseError {
                error: CombatError::StaleEncounter { .. },
                ..
            })
        )
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.inner()
            .map_or(ErrorSeverity::Recoverable, |error| error.severity())
    }

    fn error_code(&self) -> &'static str {
        self.inner().map_or("GAME_OVER", |error| error.error_code())
    }

    fn advisory(&self) -> Option<&'static str> {
        self.inner().and_then(|error| error.advisory())
    }
}
