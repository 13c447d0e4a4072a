//! Deterministic rules for a turn-based dungeon crawler.
//!
//! `game-core` defines the canonical entity model, the pure rule engines
//! (combat, progression, inventory, quests, movement) and the action pipeline
//! that applies them. All state mutation flows through [`engine::GameEngine`];
//! nothing here performs I/O, reads clocks or logs.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod grid;
pub mod inventory;
pub mod progression;
pub mod quest;
pub mod state;

pub use action::{
    Action, ActionTransition, CombatAction, CombatCommand, CombatError, Direction,
    EnemyTurnAction, EquipItemAction, ItemError, MoveAction, MoveError, UseItemAction,
};
pub use config::{CombatRules, GameConfig, PhaseRule, ProgressionRules};
pub use engine::{
    ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError,
};
pub use env::{
    GameEnv, MapDimensions, MapOracle, PcgRng, RngOracle, StaticMap, TerrainKind, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{Combatant, GameEvent};
pub use grid::{CellContent, CellKind, GameCell, Grid, project_grid};
pub use state::{
    AbilityKind, AbilityTag, BossProfile, Character, CombatOutcome, CombatTurn, Encounter,
    EncounterId, Enemy, EntityId, Equipment, GameState, GameStatus, Item, ItemCategory,
    ObjectiveKind, ObjectiveTarget, Position, Quest, QuestObjective, QuestRewards, QuestStatus,
    ResourceMeter, SpecialAbility, StatBundle, WorldItem,
};
