use crate::action::{ActionTransition, Events};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::inventory::{consume_item, equip_item};
use crate::state::{EntityId, GameState, Item, ItemCategory};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemError {
    #[error("item {item} is not in the inventory")]
    NotFound { item: EntityId },

    #[error("item {item} cannot be consumed")]
    NotConsumable { item: EntityId },

    #[error("item {item} cannot be equipped")]
    NotEquippable { item: EntityId },

    #[error("items cannot be used while the enemy is about to act")]
    AwaitingEnemyTurn,
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ItemError::AwaitingEnemyTurn => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ItemError::NotFound { .. } => "ITEM_NOT_FOUND",
            ItemError::NotConsumable { .. } => "ITEM_NOT_CONSUMABLE",
            ItemError::NotEquippable { .. } => "ITEM_NOT_EQUIPPABLE",
            ItemError::AwaitingEnemyTurn => "ITEM_AWAITING_ENEMY_TURN",
        }
    }
}

/// Only attack, defend and flee are accepted while an enemy turn is pending.
fn ensure_idle(state: &GameState) -> Result<(), ItemError> {
    match state.pending_enemy_turn() {
        Some(_) => Err(ItemError::AwaitingEnemyTurn),
        None => Ok(()),
    }
}

fn owned_item<'s>(state: &'s GameState, item: &EntityId) -> Result<&'s Item, ItemError> {
    state
        .player
        .inventory_item(item)
        .ok_or_else(|| ItemError::NotFound { item: item.clone() })
}

/// Drinks a potion from the inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub item: EntityId,
}

impl UseItemAction {
    pub fn new(item: impl Into<EntityId>) -> Self {
        Self { item: item.into() }
    }
}

impl ActionTransition for UseItemAction {
    type Error = ItemError;
    type Result = Events;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_idle(state)?;
        let item = owned_item(state, &self.item)?;
        if item.category != ItemCategory::Potion || item.stats.is_none() {
            return Err(ItemError::NotConsumable {
                item: self.item.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Events, Self::Error> {
        let item = owned_item(state, &self.item)?.clone();
        if !consume_item(&mut state.player, &item) {
            return Err(ItemError::NotConsumable {
                item: self.item.clone(),
            });
        }

        state.message = format!("Used {}!", item.name);
        Ok(vec![GameEvent::ItemConsumed { item: item.id }])
    }
}

/// Moves a weapon or armor piece from the inventory into its slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipItemAction {
    pub item: EntityId,
}

impl EquipItemAction {
    pub fn new(item: impl Into<EntityId>) -> Self {
        Self { item: item.into() }
    }
}

impl ActionTransition for EquipItemAction {
    type Error = ItemError;
    type Result = Events;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_idle(state)?;
        if !owned_item(state, &self.item)?.category.is_equippable() {
            return Err(ItemError::NotEquippable {
                item: self.item.clone(),
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Events, Self::Error> {
        let item = owned_item(state, &self.item)?.clone();
        let equipped = equip_item(&mut state.player, &item).ok_or(ItemError::NotEquippable {
            item: self.item.clone(),
        })?;

        state.message = format!("Equipped {}!", item.name);
        Ok(vec![GameEvent::ItemEquipped {
            item: item.id,
            replaced: equipped.replaced.map(|previous| previous.id),
        }])
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let equipment = &state.player.equipment;
        let slotted = [&equipment.weapon, &equipment.armor]
            .into_iter()
            .flatten()
            .any(|item| item.id == self.item);
        if slotted {
            Ok(())
        } else {
            Err(ItemError::NotEquippable {
                item: self.item.clone(),
            })
        }
    }
}
