// Domain layer: core simulation types and rules.

pub mod economy;
pub mod errors;
pub mod grid;
pub mod ports;
pub mod state;
pub mod tuning;
pub mod win;
pub mod zapper;

pub use errors::DuelError;
pub use grid::{Cell, CellKind, GRID_SIZE, Grid};
pub use state::{Duel, DuelStatus, GameState, PlayerPresence, PlayerSide};
pub use tuning::DuelTuning;
