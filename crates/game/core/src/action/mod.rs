//! Player intents and automatic turns expressed as state transitions.
//!
//! Each action type implements [`ActionTransition`]; the engine drives it
//! through `pre_validate → apply → post_validate` and wraps any failure with
//! the phase it came from. `pre_validate` must reject every intent the rules
//! ignore, so a failed action never leaves a partial mutation behind.
//!
//! # Module Structure
//!
//! - `movement`: grid movement, treasure pickup, encounter start
//! - `combat`: Attack/Defend/Flee and the automatic enemy turn
//! - `inventory`: potions and equipment
//! - `resolve`: consequences shared by several actions (victory, defeat,
//!   quest progress and rewards)

pub mod combat;
pub mod inventory;
pub mod movement;
mod resolve;
#[cfg(test)]
pub(crate) mod testing;

pub use combat::{CombatAction, CombatCommand, CombatError, EnemyTurnAction};
pub use inventory::{EquipItemAction, ItemError, UseItemAction};
pub use movement::{Direction, MoveAction, MoveError};

use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    ///
    /// Implementations may assume `pre_validate` has already succeeded.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Every state transition the engine accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Combat(CombatAction),
    /// Scheduled by the runtime after the pacing delay, never by the player.
    EnemyTurn(EnemyTurnAction),
    UseItem(UseItemAction),
    EquipItem(EquipItemAction),
}

impl Action {
    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Combat(_) => "combat",
            Action::EnemyTurn(_) => "enemy_turn",
            Action::UseItem(_) => "use_item",
            Action::EquipItem(_) => "equip_item",
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<CombatAction> for Action {
    fn from(action: CombatAction) -> Self {
        Self::Combat(action)
    }
}

impl From<EnemyTurnAction> for Action {
    fn from(action: EnemyTurnAction) -> Self {
        Self::EnemyTurn(action)
    }
}

impl From<UseItemAction> for Action {
    fn from(action: UseItemAction) -> Self {
        Self::UseItem(action)
    }
}

impl From<EquipItemAction> for Action {
    fn from(action: EquipItemAction) -> Self {
        Self::EquipItem(action)
    }
}

/// Events produced by one transition, in order.
pub type Events = Vec<GameEvent>;
