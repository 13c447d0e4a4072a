pub mod character;
pub mod common;
pub mod encounter;
pub mod enemy;
pub mod item;
pub mod quest;

pub use character::{Character, Equipment};
pub use common::{EntityId, Position, ResourceMeter};
pub use encounter::{CombatOutcome, CombatTurn, Encounter, EncounterId};
pub use enemy::{AbilityKind, AbilityTag, BossProfile, Enemy, SpecialAbility};
pub use item::{Item, ItemCategory, StatBundle, WorldItem};
pub use quest::{
    ObjectiveKind, ObjectiveTarget, Quest, QuestObjective, QuestRewards, QuestStatus,
};
