//! Quest and objective state.

use super::{EntityId, Item};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum QuestStatus {
    Available,
    Active,
    Completed,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectiveKind {
    Kill,
    Collect,
    Reach,
    Talk,
}

/// What an objective counts: a specific entity, or anything of the right kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveTarget {
    Any,
    Entity(EntityId),
}

impl ObjectiveTarget {
    /// Parses the content notation where the literal `any` is the wildcard.
    pub fn parse(raw: &str) -> Self {
        if raw == "any" {
            Self::Any
        } else {
            Self::Entity(EntityId::new(raw))
        }
    }

    pub fn matches(&self, id: &EntityId) -> bool {
        match self {
            Self::Any => true,
            Self::Entity(target) => target == id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestObjective {
    pub id: EntityId,
    pub description: String,
    pub kind: ObjectiveKind,
    pub target: ObjectiveTarget,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current: u32,
    pub required: u32,
    /// Latched: once set it never clears.
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
}

impl QuestObjective {
    pub fn new(
        id: impl Into<EntityId>,
        description: impl Into<String>,
        kind: ObjectiveKind,
        target: ObjectiveTarget,
        required: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
            target,
            current: 0,
            required,
            completed: false,
        }
    }

    /// Counts one matching event and recomputes completion.
    pub fn advance(&mut self) {
        self.current = self.current.saturating_add(1);
        self.completed = self.completed || self.current >= self.required;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestRewards {
    pub experience: u32,
    pub gold: u32,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub objectives: Vec<QuestObjective>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: QuestRewards,
    pub status: QuestStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_main_quest: bool,
}

impl Quest {
    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }

    pub fn all_objectives_completed(&self) -> bool {
        self.objectives.iter().all(|objective| objective.completed)
    }
}
