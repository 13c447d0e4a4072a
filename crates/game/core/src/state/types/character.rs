//! Player character state.
//!
//! The character is created once per playthrough and mutated in place by the
//! progression, inventory and combat rules. Equipment slots hold items that
//! have left the inventory.

use super::{EntityId, Item, Position, ResourceMeter};

/// Equipment slots. Each slot holds at most one item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    /// Creates empty equipment (nothing equipped).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips a weapon, returning the previously equipped weapon if any.
    pub fn equip_weapon(&mut self, item: Item) -> Option<Item> {
        self.weapon.replace(item)
    }

    /// Equips armor, returning the previously equipped armor if any.
    pub fn equip_armor(&mut self, item: Item) -> Option<Item> {
        self.armor.replace(item)
    }
}

/// The controllable hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub level: u32,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub experience: u32,
    pub experience_to_next: u32,
    pub attack: i32,
    pub defense: i32,
    pub position: Position,
    /// Ordered by acquisition.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    pub gold: u32,
}

impl Character {
    /// Returns true once health has reached zero.
    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    /// Index of the first inventory entry with the given id.
    pub fn inventory_index(&self, id: &EntityId) -> Option<usize> {
        self.inventory.iter().position(|item| &item.id == id)
    }

    pub fn inventory_item(&self, id: &EntityId) -> Option<&Item> {
        self.inventory.iter().find(|item| &item.id == id)
    }
}
