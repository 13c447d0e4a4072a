use crate::action::resolve::record_world_event;
use crate::action::{ActionTransition, Events};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::grid::{CellContent, CellKind};
use crate::inventory::add_to_inventory;
use crate::quest::WorldEvent;
use crate::state::{Encounter, EntityId, GameState, Position};

pub const BLOCKED_MESSAGE: &str = "Cannot move there!";
pub const MOVED_MESSAGE: &str = "Moved successfully.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("cannot move while an encounter is active")]
    InCombat,

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is a wall")]
    Blocked { destination: Position },

    #[error("player ended up on impassable cell {position}")]
    InvalidPosition { position: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::InCombat | MoveError::OutOfBounds { .. } | MoveError::Blocked { .. } => {
                ErrorSeverity::Recoverable
            }
            MoveError::InvalidPosition { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::InCombat => "MOVE_IN_COMBAT",
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::InvalidPosition { .. } => "MOVE_INVALID_POSITION",
        }
    }

    fn advisory(&self) -> Option<&'static str> {
        match self {
            MoveError::OutOfBounds { .. } | MoveError::Blocked { .. } => Some(BLOCKED_MESSAGE),
            MoveError::InCombat | MoveError::InvalidPosition { .. } => None,
        }
    }
}

/// Unit step on the grid. `y` grows downward, so `Up` decreases it.
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
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Moves the player one cell, fighting or collecting whatever is there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    fn destination_from(&self, origin: Position) -> Position {
        let (dx, dy) = self.direction.delta();
        origin.offset(dx, dy)
    }
}

/// What the destination cell holds.
enum Destination {
    Open,
    Enemy(EntityId),
    Item(EntityId),
}

fn inspect(
    state: &GameState,
    env: &GameEnv<'_>,
    destination: Position,
) -> Result<Destination, MoveError> {
    let grid = state.grid(env.map());
    let cell = grid
        .cell(destination)
        .ok_or(MoveError::OutOfBounds { destination })?;

    Ok(match (cell.kind, cell.content) {
        (CellKind::Wall, _) => return Err(MoveError::Blocked { destination }),
        (CellKind::Enemy, Some(CellContent::Enemy(enemy))) => Destination::Enemy(enemy.id.clone()),
        (CellKind::Treasure, Some(CellContent::Item(item))) => Destination::Item(item.id.clone()),
        _ => Destination::Open,
    })
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = Events;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.in_combat() {
            return Err(MoveError::InCombat);
        }
        inspect(state, env, self.destination_from(state.player.position)).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Events, Self::Error> {
        let origin = state.player.position;
        let destination = self.destination_from(origin);
        let mut events = Events::new();

        match inspect(state, env, destination)? {
            Destination::Enemy(enemy_id) => {
                // The player stays put; the enemy keeps its cell.
                let name = state
                    .enemy(&enemy_id)
                    .map(|enemy| enemy.name.clone())
                    .unwrap_or_default();
                let id = state.allocate_encounter_id();
                state.encounter = Some(Encounter::new(id, enemy_id.clone(), &name));
                events.push(GameEvent::EncounterStarted {
                    encounter: id,
                    enemy: enemy_id,
                });
            }
            Destination::Item(item_id) => {
                let Some(world) = state.take_world_item(&item_id) else {
                    return Ok(events);
                };
                let item = world.item;
                state.player.position = destination;
                state.player.gold = state.player.gold.saturating_add(item.value);
                state.message = format!("Found {}! +{} gold", item.name, item.value);
                events.push(GameEvent::Moved {
                    from: origin,
                    to: destination,
                });
                events.push(GameEvent::ItemCollected {
                    item: item_id.clone(),
                    gold: item.value,
                });
                add_to_inventory(&mut state.player, [item]);
                record_world_event(state, env, WorldEvent::Collected(&item_id), &mut events);
            }
            Destination::Open => {
                state.player.position = destination;
                state.message = MOVED_MESSAGE.to_string();
                events.push(GameEvent::Moved {
                    from: origin,
                    to: destination,
                });
            }
        }

        Ok(events)
    }

    fn post_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let position = state.player.position;
        match env.map().terrain(position) {
            Some(terrain) if terrain.is_passable() => Ok(()),
            _ => Err(MoveError::InvalidPosition { position }),
        }
    }
}
