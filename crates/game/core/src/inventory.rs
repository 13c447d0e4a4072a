//! Inventory and equipment rules.
//!
//! Equipping adds the item's bonus to the character's base stats and does not
//! subtract the bonus of the item it replaces. Swapping weapons back and forth
//! therefore keeps stacking attack; callers that need the reverse must apply
//! it themselves.

use crate::state::{Character, Item, ItemCategory};

/// What an equip operation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equipped {
    /// The previously equipped item, now back in the inventory.
    pub replaced: Option<Item>,
}

/// Appends items to the inventory in acquisition order.
pub fn add_to_inventory(character: &mut Character, items: impl IntoIterator<Item = Item>) {
    character.inventory.extend(items);
}

/// Drinks a potion.
///
/// Restores `stats.health` and `stats.mana` (capped at the maxima), then
/// decrements the matching inventory stack or removes the entry when it was the
/// last one. Returns `false` and leaves the character untouched for anything
/// that is not a potion with a stat bundle.
pub fn consume_item(character: &mut Character, item: &Item) -> bool {
    let Some(stats) = item.stats.filter(|_| item.category == ItemCategory::Potion) else {
        return false;
    };

    character.health.restore(stats.health);
    character.mana.restore(stats.mana);

    if let Some(index) = character.inventory_index(&item.id) {
        let entry = &mut character.inventory[index];
        match entry.quantity {
            Some(quantity) if quantity > 1 => entry.quantity = Some(quantity - 1),
            _ => {
                character.inventory.remove(index);
            }
        }
    }

    true
}

/// Moves a weapon or armor piece from the inventory into its slot.
///
/// The previously equipped item (if any) is appended to the inventory, the
/// new item is removed from it, and the new item's attack (weapons) or
/// defense (armor) bonus is added. Returns `None` for other categories.
pub fn equip_item(character: &mut Character, item: &Item) -> Option<Equipped> {
    let replaced = match item.category {
        ItemCategory::Weapon => character.equipment.equip_weapon(item.clone()),
        ItemCategory::Armor => character.equipment.equip_armor(item.clone()),
        ItemCategory::Potion | ItemCategory::Treasure | ItemCategory::Key => return None,
    };

    if let Some(previous) = &replaced {
        character.inventory.push(previous.clone());
    }
    if let Some(index) = character.inventory_index(&item.id) {
        character.inventory.remove(index);
    }

    if let Some(stats) = item.stats {
        match item.category {
            ItemCategory::Weapon => character.attack += stats.attack,
            ItemCategory::Armor => character.defense += stats.defense,
            _ => {}
        }
    }

    Some(Equipped { replaced })
}
