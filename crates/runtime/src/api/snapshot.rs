use serde::{Deserialize, Serialize};

use game_core::{CellKind, GameState, MapOracle};

/// Read-only view handed to renderers after every intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    /// Projected cell kinds, row-major (`grid[y][x]`).
    pub grid: Vec<Vec<CellKind>>,
    pub victory: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState, map: &impl MapOracle) -> Self {
        Self {
            grid: state.grid(map).kinds(),
            victory: state.is_victory(),
            state: state.clone(),
        }
    }

    pub fn message(&self) -> &str {
        &self.state.message
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<CellKind> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }
}
