//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It routes
//! every action through its transition phases, applies the rejection policy
//! (advisory message, no other change) and reports what happened.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::Action;
use crate::env::GameEnv;
use crate::error::GameError;
use crate::event::GameEvent;
use crate::state::{EncounterId, GameState};

/// Complete outcome of action execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Events produced by the action, in order.
    pub events: Vec<GameEvent>,

    /// Set when the encounter now waits on its automatic enemy turn. The caller
    /// schedules [`Action::EnemyTurn`] for this id after its pacing delay.
    pub enemy_turn: Option<EncounterId>,
}

/// Game engine that manages action execution.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    ///
    /// Once the game is over every action is rejected until a reset. A
    /// rejected action only updates the status message, and only when the
    /// error carries an advisory. The nonce advances after every success.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        if self.state.is_game_over() {
            return Err(ExecuteError::GameOver);
        }

        match transition::execute_transition(action, self.state, &self.env) {
            Ok(events) => {
                self.state.nonce += 1;
                Ok(ExecutionOutcome {
                    events,
                    enemy_turn: self.state.pending_enemy_turn(),
                })
            }
            Err(error) => {
                if let Some(advisory) = error.advisory() {
                    self.state.message = advisory.to_string();
                }
                Err(error)
            }
        }
    }
}
