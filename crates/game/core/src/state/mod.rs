//! Authoritative game state representation.
//!
//! This module owns the entity model (character, enemies, items, quests) and
//! the playthrough bookkeeping. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.
pub mod types;

pub use types::{
    AbilityKind, AbilityTag, BossProfile, Character, CombatOutcome, CombatTurn, Encounter,
    EncounterId, Enemy, EntityId, Equipment, Item, ItemCategory, ObjectiveKind, ObjectiveTarget,
    Position, Quest, QuestObjective, QuestRewards, QuestStatus, ResourceMeter, SpecialAbility,
    StatBundle, WorldItem,
};

use crate::env::MapOracle;
use crate::grid::{Grid, project_grid};

/// Coarse playthrough status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Playing,
    /// Player health reached zero. Only a reset leaves this state.
    GameOver,
}

pub const WELCOME_MESSAGE: &str = "Welcome to the Quest Adventure! Use WASD keys to move around.";
pub const RESET_MESSAGE: &str = "Game reset! Welcome back to the adventure!";

/// Canonical snapshot of the game simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Combined with `nonce` to generate unique seeds for each random event.
    pub game_seed: u64,

    /// Sequence number of successfully executed actions.
    pub nonce: u64,

    /// Incremented on every reset; part of every [`EncounterId`].
    pub epoch: u32,

    /// Sequential encounter allocator within the current epoch.
    encounter_seq: u32,

    pub current_level: u32,
    pub player: Character,
    pub enemies: Vec<Enemy>,
    /// Items lying in the dungeon.
    pub items: Vec<WorldItem>,
    pub quests: Vec<Quest>,
    pub status: GameStatus,
    /// Last user-facing advisory.
    pub message: String,
    pub encounter: Option<Encounter>,
}

impl GameState {
    /// Creates a fresh playthrough from its starting entities.
    pub fn new(
        game_seed: u64,
        player: Character,
        enemies: Vec<Enemy>,
        items: Vec<WorldItem>,
        quests: Vec<Quest>,
    ) -> Self {
        Self {
            game_seed,
            nonce: 0,
            epoch: 0,
            encounter_seq: 0,
            current_level: 1,
            player,
            enemies,
            items,
            quests,
            status: GameStatus::Playing,
            message: WELCOME_MESSAGE.to_string(),
            encounter: None,
        }
    }

    /// Replaces this playthrough with `fresh`, keeping encounter identities unique.
    ///
    /// The epoch of the fresh state is advanced past the current one so that any
    /// enemy turn scheduled before the reset no longer matches.
    pub fn reset(&mut self, fresh: GameState) {
        let epoch = self.epoch.wrapping_add(1);
        *self = fresh;
        self.epoch = epoch;
        self.encounter_seq = 0;
        self.encounter = None;
        self.status = GameStatus::Playing;
        self.message = RESET_MESSAGE.to_string();
    }

    /// Allocates a new unique encounter id.
    pub fn allocate_encounter_id(&mut self) -> EncounterId {
        self.encounter_seq = self.encounter_seq.wrapping_add(1);
        EncounterId {
            epoch: self.epoch,
            seq: self.encounter_seq,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn in_combat(&self) -> bool {
        self.encounter.is_some()
    }

    /// The encounter currently waiting on its automatic enemy turn.
    pub fn pending_enemy_turn(&self) -> Option<EncounterId> {
        self.encounter
            .as_ref()
            .filter(|encounter| encounter.turn == CombatTurn::EnemyTurn)
            .map(|encounter| encounter.id)
    }

    /// A playthrough is won once any main quest is completed.
    pub fn is_victory(&self) -> bool {
        self.quests
            .iter()
            .any(|quest| quest.is_main_quest && quest.is_completed())
    }

    pub fn enemy(&self, id: &EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| &enemy.id == id)
    }

    pub fn enemy_mut(&mut self, id: &EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| &enemy.id == id)
    }

    /// Removes a defeated enemy from the world, returning it.
    pub fn remove_enemy(&mut self, id: &EntityId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|enemy| &enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Removes a world item by id, returning it.
    pub fn take_world_item(&mut self, id: &EntityId) -> Option<WorldItem> {
        let index = self.items.iter().position(|world| &world.item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn quest(&self, id: &EntityId) -> Option<&Quest> {
        self.quests.iter().find(|quest| &quest.id == id)
    }

    /// Projects the current entities onto the static map.
    pub fn grid<'s, M>(&'s self, map: &M) -> Grid<'s>
    where
        M: MapOracle + ?Sized,
    {
        project_grid(map, &self.player, &self.enemies, &self.items)
    }
}
