use serde::{Deserialize, Serialize};

use crate::domain::grid::{CellKind, Grid};
use crate::domain::state::{Duel, GameState};

// Request payload for starting a duel.
#[derive(Debug, Deserialize)]
pub struct StartDuelRequest {
    pub player1_id: String,
    pub player2_id: String,
}

// Response payload for starting a duel.
#[derive(Debug, Serialize)]
pub struct StartDuelResponse {
    pub duel_id: String,
}

// Request payload for advancing a duel by one tick.
#[derive(Debug, Deserialize)]
pub struct TickRequest {
    pub duel_id: String,
}

// Response payload for a tick: the recomputed balances, timers, and derived
// counts, plus the grid when this tick mutated it.
#[derive(Debug, Serialize)]
pub struct TickResponse {
    pub player1_energy: f64,
    pub player2_energy: f64,
    pub player1_timer: u64,
    pub player2_timer: u64,
    pub player1_cells: u32,
    pub player2_cells: u32,
    pub player1_rate: u64,
    pub player2_rate: u64,
    pub player1_generators: u32,
    pub player2_generators: u32,
    pub winner_id: Option<String>,
    pub grid: Option<Grid>,
}

// Request payload for purchasing a cell.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub duel_id: String,
    pub player_id: String,
    pub row: usize,
    pub col: usize,
    pub kind: Option<CellKind>,
}

// Response payload for a successful purchase.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    pub success: bool,
    pub cost: u64,
    pub new_energy: f64,
    pub kind: CellKind,
}

// Request payload for a presence heartbeat.
#[derive(Debug, Deserialize)]
pub struct HeartbeatRequest {
    pub player_id: String,
}

// Response payload for a presence heartbeat.
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    pub last_seen: u64,
}

// Response payload for a duel snapshot.
#[derive(Debug, Serialize)]
pub struct DuelSnapshotResponse {
    pub duel: Duel,
    pub game_state: GameState,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
