//! Grid projection.
//!
//! The grid is a derived view: it is rebuilt from the static map and the
//! current player, enemies and world items whenever it is needed and never
//! stored. Cells borrow the entities they display.

use crate::env::{MapOracle, TerrainKind};
use crate::state::{Character, Enemy, Item, Position, WorldItem};

/// Cell classification as seen by renderers and the movement controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CellKind {
    Empty,
    Wall,
    Player,
    Enemy,
    Treasure,
    Npc,
    Exit,
}

/// Entity displayed in a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent<'a> {
    Enemy(&'a Enemy),
    Item(&'a Item),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameCell<'a> {
    pub kind: CellKind,
    pub content: Option<CellContent<'a>>,
    pub position: Position,
}

impl<'a> GameCell<'a> {
    fn bare(kind: CellKind, position: Position) -> Self {
        Self {
            kind,
            content: None,
            position,
        }
    }
}

/// Row-major projection of the dungeon (`rows[y][x]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<'a> {
    rows: Vec<Vec<GameCell<'a>>>,
}

impl<'a> Grid<'a> {
    pub fn cell(&self, position: Position) -> Option<&GameCell<'a>> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.rows
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
    }

    pub fn rows(&self) -> &[Vec<GameCell<'a>>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Owned kind-only copy, detached from the entity borrows.
    pub fn kinds(&self) -> Vec<Vec<CellKind>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.kind).collect())
            .collect()
    }
}

/// Builds the grid from scratch.
///
/// Layering order: terrain, then the player, then enemies (overwriting
/// whatever is below), then world items, which only land on empty cells.
pub fn project_grid<'a, M>(
    map: &M,
    player: &'a Character,
    enemies: &'a [Enemy],
    items: &'a [WorldItem],
) -> Grid<'a>
where
    M: MapOracle + ?Sized,
{
    let dimensions = map.dimensions();
    let mut rows: Vec<Vec<GameCell<'a>>> = (0..dimensions.height as i32)
        .map(|y| {
            (0..dimensions.width as i32)
                .map(|x| {
                    let position = Position::new(x, y);
                    let kind = match map.terrain(position) {
                        Some(TerrainKind::Wall) => CellKind::Wall,
                        Some(TerrainKind::Exit) => CellKind::Exit,
                        Some(TerrainKind::Floor) | None => CellKind::Empty,
                    };
                    GameCell::bare(kind, position)
                })
                .collect()
        })
        .collect();

    if let Some(cell) = cell_mut(&mut rows, player.position) {
        *cell = GameCell::bare(CellKind::Player, player.position);
    }

    for enemy in enemies {
        if let Some(cell) = cell_mut(&mut rows, enemy.position) {
            *cell = GameCell {
                kind: CellKind::Enemy,
                content: Some(CellContent::Enemy(enemy)),
                position: enemy.position,
            };
        }
    }

    for world in items {
        if let Some(cell) = cell_mut(&mut rows, world.position)
            && cell.kind == CellKind::Empty
        {
            *cell = GameCell {
                kind: CellKind::Treasure,
                content: Some(CellContent::Item(&world.item)),
                position: world.position,
            };
        }
    }

    Grid { rows }
}

fn cell_mut<'r, 'a>(
    rows: &'r mut [Vec<GameCell<'a>>],
    position: Position,
) -> Option<&'r mut GameCell<'a>> {
    if position.x < 0 || position.y < 0 {
        return None;
    }
    rows.get_mut(position.y as usize)
        .and_then(|row| row.get_mut(position.x as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, StaticMap};
    use crate::state::{Equipment, EntityId, ItemCategory, ResourceMeter};

    fn hero(position: Position) -> Character {
        Character {
            id: EntityId::player(),
            name: "Hero".into(),
            level: 1,
            health: ResourceMeter::full(100),
            mana: ResourceMeter::full(50),
            experience: 0,
            experience_to_next: 100,
            attack: 15,
            defense: 5,
            position,
            inventory: Vec::new(),
            equipment: Equipment::empty(),
            gold: 0,
        }
    }

    fn rat(position: Position) -> Enemy {
        Enemy {
            id: EntityId::new("rat"),
            name: "Rat".into(),
            health: ResourceMeter::full(5),
            attack: 1,
            defense: 0,
            position,
            experience: 1,
            gold: 0,
            loot: Vec::new(),
            boss: None,
        }
    }

    #[test]
    fn projects_layers_in_order() {
        let map = StaticMap::bordered(MapDimensions::new(6, 5), [Position::new(3, 1)]);
        let player = hero(Position::new(1, 1));
        let enemies = vec![rat(Position::new(2, 2))];
        let items = vec![
            WorldItem::new(
                Item::new("gem", "Gem", ItemCategory::Treasure, "Shiny", 10),
                Position::new(4, 3),
            ),
            // Hidden beneath the rat.
            WorldItem::new(
                Item::new("coin", "Coin", ItemCategory::Treasure, "Round", 1),
                Position::new(2, 2),
            ),
        ];

        let grid = project_grid(&map, &player, &enemies, &items);

        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.cell(Position::new(0, 0)).unwrap().kind, CellKind::Wall);
        assert_eq!(grid.cell(Position::new(3, 1)).unwrap().kind, CellKind::Wall);
        assert_eq!(grid.cell(Position::new(1, 1)).unwrap().kind, CellKind::Player);

        let enemy_cell = grid.cell(Position::new(2, 2)).unwrap();
        assert_eq!(enemy_cell.kind, CellKind::Enemy);
        assert!(matches!(enemy_cell.content, Some(CellContent::Enemy(e)) if e.id.as_str() == "rat"));

        let item_cell = grid.cell(Position::new(4, 3)).unwrap();
        assert_eq!(item_cell.kind, CellKind::Treasure);
        assert!(grid.cell(Position::new(9, 9)).is_none());
    }
}
