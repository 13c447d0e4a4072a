//! Combat encounter bookkeeping.

use std::fmt;

use super::EntityId;

/// Identity of one encounter.
///
/// `epoch` changes on every game reset and `seq` on every encounter started
/// within a playthrough, so a token captured by a delayed enemy turn can be
/// compared against the live encounter to detect staleness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterId {
    pub epoch: u32,
    pub seq: u32,
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.epoch, self.seq)
    }
}

/// Whose move it is inside an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatTurn {
    PlayerTurn,
    EnemyTurn,
}

/// Terminal result of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// A combat session in progress between the player and one enemy.
///
/// The enemy itself stays in the world's enemy list and is mutated in place;
/// the encounter only references it. An ended encounter is dropped from the
/// state, so `CombatEnded` has no stored representation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub id: EncounterId,
    pub enemy: EntityId,
    pub turn: CombatTurn,
    /// Set when the player chose Defend this round; consumed by the enemy turn.
    pub defending: bool,
    pub log: Vec<String>,
}

impl Encounter {
    pub fn new(id: EncounterId, enemy: EntityId, enemy_name: &str) -> Self {
        Self {
            id,
            enemy,
            turn: CombatTurn::PlayerTurn,
            defending: false,
            log: vec![format!("Combat started with {enemy_name}!")],
        }
    }

    pub fn is_player_turn(&self) -> bool {
        self.turn == CombatTurn::PlayerTurn
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}
