//! Item-related state types.
//!
//! This module contains foundational item types:
//! - Item: a concrete item instance (inventory, loot, rewards, world)
//! - StatBundle: optional stat deltas carried by equipment and potions
//! - WorldItem: items lying on the dungeon floor

use super::{EntityId, Position};

/// Item category. Determines which inventory operations are meaningful.
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
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
    Treasure,
    Key,
}

impl ItemCategory {
    /// Returns true for categories that occupy an equipment slot.
    pub const fn is_equippable(self) -> bool {
        matches!(self, Self::Weapon | Self::Armor)
    }
}

/// Stat deltas granted by an item. Absent fields are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBundle {
    pub attack: i32,
    pub defense: i32,
    pub health: u32,
    pub mana: u32,
}

impl StatBundle {
    pub const fn attack(attack: i32) -> Self {
        Self {
            attack,
            defense: 0,
            health: 0,
            mana: 0,
        }
    }

    pub const fn defense(defense: i32) -> Self {
        Self {
            attack: 0,
            defense,
            health: 0,
            mana: 0,
        }
    }

    pub const fn restore(health: u32, mana: u32) -> Self {
        Self {
            attack: 0,
            defense: 0,
            health,
            mana,
        }
    }
}

/// A concrete item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub category: ItemCategory,
    pub description: String,
    /// Gold value; credited to the player when picked up from the floor.
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<StatBundle>,
    /// Stack size. `None` and `Some(1)` both mean a single, non-stacking item.
    #[cfg_attr(feature = "serde", serde(default))]
    pub quantity: Option<u32>,
}

impl Item {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        category: ItemCategory,
        description: impl Into<String>,
        value: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: description.into(),
            value,
            stats: None,
            quantity: None,
        }
    }

    pub fn with_stats(mut self, stats: StatBundle) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Stack size treating an absent quantity as one.
    pub fn stack_size(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}

/// An item lying in the dungeon, waiting to be picked up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldItem {
    pub item: Item,
    pub position: Position,
}

impl WorldItem {
    pub fn new(item: Item, position: Position) -> Self {
        Self { item, position }
    }
}
