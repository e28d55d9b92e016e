use async_trait::async_trait;

use crate::domain::grid::Grid;
use crate::domain::state::{Duel, GameState, PlayerPresence};

/// Partial-field update for a game state record. `None` fields are left as
/// they are; the grid is only written when a tick or purchase mutated it.
#[derive(Clone, Debug, Default)]
pub struct GameStatePatch {
    pub player1_energy: Option<f64>,
    pub player2_energy: Option<f64>,
    pub player1_timer: Option<u64>,
    pub player2_timer: Option<u64>,
    pub last_energy_update: Option<u64>,
    pub last_timer_update: Option<u64>,
    pub grid: Option<Grid>,
}

impl GameStatePatch {
    /// Applies the set fields onto a stored record.
    pub fn apply(self, state: &mut GameState) {
        if let Some(energy) = self.player1_energy {
            state.player1_energy = energy;
        }
        if let Some(energy) = self.player2_energy {
            state.player2_energy = energy;
        }
        if let Some(timer) = self.player1_timer {
            state.player1_timer = timer;
        }
        if let Some(timer) = self.player2_timer {
            state.player2_timer = timer;
        }
        if let Some(at) = self.last_energy_update {
            state.last_energy_update = at;
        }
        if let Some(at) = self.last_timer_update {
            state.last_timer_update = at;
        }
        if let Some(grid) = self.grid {
            state.grid = grid;
        }
    }
}

// Port for duel persistence used by the duel use cases. The implementation
// is expected to serialize writes per record; the engine itself provides no
// cross-call ordering beyond last-write-commits.
#[async_trait]
pub trait DuelStore: Send + Sync {
    async fn insert_duel(&self, duel: Duel, state: GameState) -> Result<(), String>;
    async fn get_duel(&self, duel_id: &str) -> Result<Option<Duel>, String>;
    async fn get_game_state(&self, duel_id: &str) -> Result<Option<GameState>, String>;
    async fn patch_game_state(&self, duel_id: &str, patch: GameStatePatch) -> Result<(), String>;
    async fn complete_duel(
        &self,
        duel_id: &str,
        winner_id: &str,
        completed_at: u64,
    ) -> Result<(), String>;
    async fn get_presence(&self, player_id: &str) -> Result<Option<PlayerPresence>, String>;
    async fn touch_presence(&self, player_id: &str, last_seen: u64) -> Result<(), String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_ms(&self) -> u64;
}

// Port for the zapper's uniform pick over a candidate set. Production uses a
// real random source; tests supply deterministic sequences.
pub trait TargetPicker: Send + Sync {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick_index(&self, len: usize) -> usize;
}
