//! Domain events emitted by the engine.
//!
//! Every executed action returns the events it produced, in order. The
//! runtime forwards them to subscribers; the engine itself never reads them
//! back.

use crate::state::{AbilityKind, CombatOutcome, EncounterId, EntityId, Position};

/// Who dealt or received damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Combatant {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    Moved {
        from: Position,
        to: Position,
    },
    ItemCollected {
        item: EntityId,
        gold: u32,
    },
    EncounterStarted {
        encounter: EncounterId,
        enemy: EntityId,
    },
    DamageDealt {
        encounter: EncounterId,
        target: Combatant,
        amount: u32,
        remaining: u32,
    },
    AbilityUsed {
        encounter: EncounterId,
        enemy: EntityId,
        ability: AbilityKind,
        narration: String,
    },
    BossPhaseChanged {
        enemy: EntityId,
        phase: u8,
    },
    Defended {
        encounter: EncounterId,
    },
    EncounterEnded {
        encounter: EncounterId,
        enemy: EntityId,
        outcome: CombatOutcome,
    },
    EnemyDefeated {
        enemy: EntityId,
        experience: u32,
        gold: u32,
        loot: Vec<EntityId>,
    },
    PlayerDefeated,
    LevelUp {
        level: u32,
    },
    ObjectiveProgressed {
        quest: EntityId,
        objective: EntityId,
        current: u32,
        required: u32,
    },
    QuestCompleted {
        quest: EntityId,
        is_main_quest: bool,
    },
    ItemConsumed {
        item: EntityId,
    },
    ItemEquipped {
        item: EntityId,
        replaced: Option<EntityId>,
    },
}
