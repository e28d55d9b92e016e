// Persisted duel records and per-duel simulation state.

use serde::{Deserialize, Serialize};

use crate::domain::grid::Grid;

/// Which seat a player occupies in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSide {
    PlayerOne,
    PlayerTwo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelStatus {
    Pending,
    Active,
    Completed,
}

/// One match between two players. Transitions Active -> Completed exactly
/// once, driven by the tick use case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Duel {
    pub id: String,
    pub player1_id: String,
    pub player2_id: String,
    pub status: DuelStatus,
    pub winner_id: Option<String>,
    pub created_at: u64,
    pub started_at: Option<u64>,
    pub completed_at: Option<u64>,
}

impl Duel {
    pub fn side_of(&self, player_id: &str) -> Option<PlayerSide> {
        if self.player1_id == player_id {
            Some(PlayerSide::PlayerOne)
        } else if self.player2_id == player_id {
            Some(PlayerSide::PlayerTwo)
        } else {
            None
        }
    }
}

/// Mutable simulation state for one duel (1:1 with `Duel`). Energies are
/// fractional and unrounded; rounding is a display concern. Timers are
/// countdowns in milliseconds. The two anchor timestamps govern both players
/// jointly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub duel_id: String,
    pub player1_energy: f64,
    pub player2_energy: f64,
    pub player1_timer: u64,
    pub player2_timer: u64,
    pub last_energy_update: u64,
    pub last_timer_update: u64,
    pub grid: Grid,
}

/// Presence record used for disconnect detection; read-only to the engine
/// except through the heartbeat endpoint.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerPresence {
    pub last_seen: u64,
}
