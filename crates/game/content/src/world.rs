//! Complete starting world description.

use game_core::{
    Character, Enemy, GameState, MapDimensions, MapOracle, Position, Quest, StaticMap, WorldItem,
};

/// Everything needed to start a playthrough: map layout and starting entities.
///
/// A `WorldSpec` is immutable content. [`WorldSpec::new_game`] clones it into a
/// fresh [`GameState`], which is also how a reset rebuilds the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSpec {
    pub dimensions: MapDimensions,
    /// Interior walls. The outer ring is always wall.
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exits: Vec<Position>,
    pub player: Character,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<Enemy>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<WorldItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quests: Vec<Quest>,
}

impl WorldSpec {
    pub fn map(&self) -> StaticMap {
        StaticMap::bordered(self.dimensions, self.walls.iter().copied())
            .with_exits(self.exits.iter().copied())
    }

    /// Builds the starting state for a new playthrough.
    pub fn new_game(&self, game_seed: u64) -> GameState {
        GameState::new(
            game_seed,
            self.player.clone(),
            self.enemies.clone(),
            self.items.clone(),
            self.quests.clone(),
        )
    }

    /// Positions of entities placed on a wall or outside the map.
    ///
    /// A well-formed world returns an empty list.
    pub fn misplaced(&self) -> Vec<(String, Position)> {
        let map = self.map();
        let placed = |position: Position| {
            map.terrain(position)
                .is_some_and(|terrain| terrain.is_passable())
        };

        std::iter::once((self.player.id.as_str().to_owned(), self.player.position))
            .chain(
                self.enemies
                    .iter()
                    .map(|enemy| (enemy.id.as_str().to_owned(), enemy.position)),
            )
            .chain(
                self.items
                    .iter()
                    .map(|world| (world.item.id.as_str().to_owned(), world.position)),
            )
            .filter(|(_, position)| !placed(*position))
            .collect()
    }
}
