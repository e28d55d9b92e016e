// Player-initiated cell acquisition: validation, pricing, atomic apply.

use crate::domain::economy;
use crate::domain::errors::DuelError;
use crate::domain::grid::{Cell, CellKind};
use crate::domain::ports::{Clock, DuelStore, GameStatePatch};
use crate::domain::state::{DuelStatus, PlayerSide};
use crate::domain::tuning::DuelTuning;

/// Outcome of a successful purchase.
#[derive(Debug, Clone, Copy)]
pub struct PurchaseReceipt {
    pub cost: u64,
    pub new_energy: f64,
    pub kind: CellKind,
}

// Purchase use case with injected dependencies. Coordinates are validated at
// the HTTP boundary; callers pass in-bounds indices.
pub struct PurchaseUseCase<C, S> {
    pub clock: C,
    pub store: S,
    pub tuning: DuelTuning,
}

impl<C, S> PurchaseUseCase<C, S>
where
    C: Clock,
    S: DuelStore,
{
    pub async fn execute(
        &self,
        duel_id: &str,
        player_id: &str,
        row: usize,
        col: usize,
        requested: CellKind,
    ) -> Result<PurchaseReceipt, DuelError> {
        let state = self
            .store
            .get_game_state(duel_id)
            .await
            .map_err(|_| DuelError::StorageFailure)?
            .ok_or(DuelError::NotFound)?;
        let duel = self
            .store
            .get_duel(duel_id)
            .await
            .map_err(|_| DuelError::StorageFailure)?
            .ok_or(DuelError::NotFound)?;

        if duel.status != DuelStatus::Active {
            return Err(DuelError::InvalidState);
        }
        let side = duel.side_of(player_id).ok_or(DuelError::InvalidState)?;

        let target = &state.grid.cells[row][col];
        if target.owned_by(player_id) {
            return Err(DuelError::AlreadyOwned);
        }
        let is_capture = target.owner.is_some();
        if is_capture && target.kind == CellKind::Hardened {
            return Err(DuelError::Uncapturable);
        }

        // First placement is unconstrained; afterwards every acquisition must
        // touch owned territory.
        let owned = state.grid.owned_count(player_id);
        if owned > 0 && !state.grid.has_adjacent_owned(row, col, player_id) {
            return Err(DuelError::NotAdjacent);
        }

        let (cost, resolved) = economy::purchase_cost(owned, requested, is_capture, &self.tuning);
        let energy = match side {
            PlayerSide::PlayerOne => state.player1_energy,
            PlayerSide::PlayerTwo => state.player2_energy,
        };
        if energy < cost as f64 {
            return Err(DuelError::InsufficientResources);
        }

        let now = self.clock.now_epoch_ms();
        let new_energy = energy - cost as f64;
        let mut grid = state.grid;
        grid.cells[row][col] = Cell {
            owner: Some(player_id.to_string()),
            kind: resolved,
            acquired_at: Some(now),
            last_zap_at: None,
        };

        // The buyer's countdown rearms and the timer anchor rebases; the
        // opponent's timer value and the energy anchor are left untouched.
        let mut patch = GameStatePatch {
            last_timer_update: Some(now),
            grid: Some(grid),
            ..GameStatePatch::default()
        };
        match side {
            PlayerSide::PlayerOne => {
                patch.player1_energy = Some(new_energy);
                patch.player1_timer = Some(self.tuning.timer_reset_ms);
            }
            PlayerSide::PlayerTwo => {
                patch.player2_energy = Some(new_energy);
                patch.player2_timer = Some(self.tuning.timer_reset_ms);
            }
        }
        self.store
            .patch_game_state(duel_id, patch)
            .await
            .map_err(|_| DuelError::StorageFailure)?;

        Ok(PurchaseReceipt {
            cost,
            new_energy,
            kind: resolved,
        })
    }
}
