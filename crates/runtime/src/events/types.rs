//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::{EncounterId, GameEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Movement, pickups and inventory changes
    World,
    /// Encounters, damage, boss abilities and phases
    Combat,
    /// Objective progress, quest completion and level-ups
    Quest,
    /// Session lifecycle: start, reset, game over, rejected intents
    Session,
}

impl Topic {
    pub const COUNT: usize = 4;
    pub const ALL: [Topic; Self::COUNT] =
        [Topic::World, Topic::Combat, Topic::Quest, Topic::Session];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Lifecycle notifications that do not come from a rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started {
        game_seed: u64,
    },
    Reset {
        epoch: u32,
    },
    /// An intent was refused by the engine.
    ActionRejected {
        action: String,
        code: String,
        message: String,
    },
    /// A delayed enemy turn fired for an encounter that no longer exists.
    EnemyTurnDiscarded {
        encounter: EncounterId,
    },
}

/// Event wrapper routed by topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Engine event, stamped with the nonce of the action that produced it.
    Game { nonce: u64, event: GameEvent },
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game { event, .. } => match event {
                GameEvent::Moved { .. }
                | GameEvent::ItemCollected { .. }
                | GameEvent::ItemConsumed { .. }
                | GameEvent::ItemEquipped { .. } => Topic::World,
                GameEvent::EncounterStarted { .. }
                | GameEvent::DamageDealt { .. }
                | GameEvent::AbilityUsed { .. }
                | GameEvent::BossPhaseChanged { .. }
                | GameEvent::Defended { .. }
                | GameEvent::EncounterEnded { .. }
                | GameEvent::EnemyDefeated { .. } => Topic::Combat,
                GameEvent::LevelUp { .. }
                | GameEvent::ObjectiveProgressed { .. }
                | GameEvent::QuestCompleted { .. } => Topic::Quest,
                GameEvent::PlayerDefeated => Topic::Session,
            },
            Event::Session(_) => Topic::Session,
        }
    }
}
