use std::collections::BTreeSet;

use crate::state::Position;

/// Static map oracle exposing the immutable dungeon layout.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Terrain at `position`, or `None` outside the map.
    fn terrain(&self, position: Position) -> Option<TerrainKind>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Exit,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Wall)
    }
}

/// Rectangular dungeon enclosed by a wall border, with optional interior walls
/// and exits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticMap {
    dimensions: MapDimensions,
    walls: BTreeSet<Position>,
    exits: BTreeSet<Position>,
}

impl StaticMap {
    /// Builds a map whose outermost ring is wall.
    pub fn bordered(
        dimensions: MapDimensions,
        interior_walls: impl IntoIterator<Item = Position>,
    ) -> Self {
        let width = dimensions.width as i32;
        let height = dimensions.height as i32;
        let mut walls = BTreeSet::new();

        for x in 0..width {
            walls.insert(Position::new(x, 0));
            walls.insert(Position::new(x, height - 1));
        }
        for y in 0..height {
            walls.insert(Position::new(0, y));
            walls.insert(Position::new(width - 1, y));
        }
        // Interior walls are only honored strictly inside the border.
        walls.extend(interior_walls.into_iter().filter(|pos| {
            pos.x > 0 && pos.x < width - 1 && pos.y > 0 && pos.y < height - 1
        }));

        Self {
            dimensions,
            walls,
            exits: BTreeSet::new(),
        }
    }

    pub fn with_exits(mut self, exits: impl IntoIterator<Item = Position>) -> Self {
        self.exits.extend(exits);
        self
    }
}

impl MapOracle for StaticMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn terrain(&self, position: Position) -> Option<TerrainKind> {
        if !self.dimensions.contains(position) {
            return None;
        }
        if self.walls.contains(&position) {
            Some(TerrainKind::Wall)
        } else if self.exits.contains(&position) {
            Some(TerrainKind::Exit)
        } else {
            Some(TerrainKind::Floor)
        }
    }
}
