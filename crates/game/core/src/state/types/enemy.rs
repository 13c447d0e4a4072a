//! Enemy state, including boss attributes and special abilities.

use super::{EntityId, Item, Position, ResourceMeter};

/// Identifies a boss special ability.
///
/// Effects are resolved by matching on this enum (see `combat::boss`), so a new
/// ability cannot be added without also defining what it does.
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
pub enum AbilityKind {
    FireBreath,
    DeathBolt,
    ShadowHeal,
    LifeDrain,
    RageMode,
    SummonUndead,
}

/// Descriptive effect tag. Display only; behavior follows [`AbilityKind`].
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
pub enum AbilityTag {
    Heal,
    Rage,
    Buff,
}

/// A boss special ability with its cooldown bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAbility {
    pub id: EntityId,
    pub kind: AbilityKind,
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag: Option<AbilityTag>,
    /// Enemy turns before the ability may be used again.
    pub cooldown: u32,
    /// Turns remaining until usable. Zero means ready.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_cooldown: u32,
}

impl SpecialAbility {
    pub fn new(
        id: impl Into<EntityId>,
        kind: AbilityKind,
        name: impl Into<String>,
        description: impl Into<String>,
        cooldown: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: description.into(),
            damage: None,
            tag: None,
            cooldown,
            current_cooldown: 0,
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_tag(mut self, tag: AbilityTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Reduces the remaining cooldown by one turn, flooring at zero.
    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }

    /// Puts the ability on its configured cooldown.
    pub fn trigger_cooldown(&mut self) {
        self.current_cooldown = self.cooldown;
    }
}

/// Boss-only attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossProfile {
    /// 1-based, never decreases.
    #[cfg_attr(feature = "serde", serde(default = "BossProfile::first_phase"))]
    pub phase: u8,
    pub max_phases: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<SpecialAbility>,
}

impl BossProfile {
    pub fn new(max_phases: u8, abilities: Vec<SpecialAbility>) -> Self {
        Self {
            phase: Self::first_phase(),
            max_phases,
            abilities,
        }
    }

    const fn first_phase() -> u8 {
        1
    }
}

/// A hostile creature placed in the dungeon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EntityId,
    pub name: String,
    pub health: ResourceMeter,
    pub attack: i32,
    pub defense: i32,
    pub position: Position,
    /// Experience granted on defeat.
    pub experience: u32,
    /// Gold granted on defeat.
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: Option<BossProfile>,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    /// Current boss phase, or `None` for ordinary enemies.
    pub fn phase(&self) -> Option<u8> {
        self.boss.as_ref().map(|boss| boss.phase)
    }
}
