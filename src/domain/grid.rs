// The duel board: a fixed 10x10 matrix of ownership/type state.

use serde::{Deserialize, Serialize};

/// Board dimension; every duel grid is `GRID_SIZE` x `GRID_SIZE`.
pub const GRID_SIZE: usize = 10;

/// Seed cell coordinates at duel creation (row, col).
pub const PLAYER1_SEED: (usize, usize) = (0, 4);
pub const PLAYER2_SEED: (usize, usize) = (9, 5);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    #[default]
    Neutral,
    Basic,
    Hardened,
    Generator,
    Zapper,
}

/// One grid square. A `Neutral` cell never has an owner; every other kind
/// always does.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub owner: Option<String>,
    pub kind: CellKind,
    pub acquired_at: Option<u64>,
    pub last_zap_at: Option<u64>,
}

impl Cell {
    pub fn owned_by(&self, player_id: &str) -> bool {
        self.owner.as_deref() == Some(player_id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Builds the starting board: all neutral except one basic seed cell per
    /// player at the fixed symmetric coordinates.
    pub fn new_seeded(player1_id: &str, player2_id: &str, now: u64) -> Self {
        let mut grid = Self::default();
        for (seed, player_id) in [(PLAYER1_SEED, player1_id), (PLAYER2_SEED, player2_id)] {
            grid.cells[seed.0][seed.1] = Cell {
                owner: Some(player_id.to_string()),
                kind: CellKind::Basic,
                acquired_at: Some(now),
                last_zap_at: None,
            };
        }
        grid
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE
    }

    pub fn owned_count(&self, player_id: &str) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.owned_by(player_id))
            .count() as u32
    }

    /// True if any 4-neighbor of (row, col) is owned by the player.
    pub fn has_adjacent_owned(&self, row: usize, col: usize, player_id: &str) -> bool {
        const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        NEIGHBORS.iter().any(|&(dr, dc)| {
            let (r, c) = (row as isize + dr, col as isize + dc);
            r >= 0
                && c >= 0
                && (r as usize) < GRID_SIZE
                && (c as usize) < GRID_SIZE
                && self.cells[r as usize][c as usize].owned_by(player_id)
        })
    }
}
