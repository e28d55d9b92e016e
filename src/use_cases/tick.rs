// The authoritative state advance for one duel. Invoked by an external
// poller roughly once per second; all elapsed time is derived from the
// stored anchor timestamps, never from call cadence.

use tracing::info;

use crate::domain::economy;
use crate::domain::errors::DuelError;
use crate::domain::grid::{Cell, CellKind, GRID_SIZE, Grid};
use crate::domain::ports::{Clock, DuelStore, GameStatePatch, TargetPicker};
use crate::domain::state::{DuelStatus, PlayerSide};
use crate::domain::tuning::DuelTuning;
use crate::domain::{win, zapper};

/// Everything a tick computed, returned to the polling caller. `grid` is
/// only present when maintenance or a zap mutated the board.
#[derive(Debug, Clone)]
pub struct TickReport {
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

// Tick use case with injected dependencies.
pub struct TickUseCase<C, S, P> {
    pub clock: C,
    pub store: S,
    pub picker: P,
    pub tuning: DuelTuning,
}

impl<C, S, P> TickUseCase<C, S, P>
where
    C: Clock,
    S: DuelStore,
    P: TargetPicker,
{
    pub async fn execute(&self, duel_id: &str) -> Result<TickReport, DuelError> {
        let duel = self
            .store
            .get_duel(duel_id)
            .await
            .map_err(|_| DuelError::StorageFailure)?
            .ok_or(DuelError::NotFound)?;
        let mut state = self
            .store
            .get_game_state(duel_id)
            .await
            .map_err(|_| DuelError::StorageFailure)?
            .ok_or(DuelError::NotFound)?;

        let now = self.clock.now_epoch_ms();
        // Saturating deltas reject stale or out-of-order calls: a replay with
        // an old `now` advances nothing instead of double-counting.
        let d_energy = now.saturating_sub(state.last_energy_update);
        let d_timer = now.saturating_sub(state.last_timer_update);

        // Grid maintenance: expire generators, arm due zappers.
        let mut grid_changed = false;
        let mut due_zaps: Vec<(usize, usize, String)> = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let cell = &mut state.grid.cells[row][col];
                match cell.kind {
                    CellKind::Generator => {
                        if let Some(acquired) = cell.acquired_at
                            && now.saturating_sub(acquired) >= self.tuning.generator_lifetime_ms
                        {
                            *cell = Cell::default();
                            grid_changed = true;
                        }
                    }
                    CellKind::Zapper => {
                        if let (Some(owner), Some(acquired)) = (&cell.owner, cell.acquired_at) {
                            let anchor = cell.last_zap_at.unwrap_or(0).max(acquired);
                            if now.saturating_sub(anchor) >= self.tuning.zap_cooldown_ms {
                                let owner = owner.clone();
                                cell.last_zap_at = Some(now);
                                // The rearmed cooldown must persist even when
                                // the zap itself ends up a no-op.
                                grid_changed = true;
                                due_zaps.push((row, col, owner));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        // Resolve queued zaps in row-major order against the maintained grid.
        for (row, col, owner) in due_zaps {
            if zapper::resolve_zap(
                &mut state.grid,
                row,
                col,
                &owner,
                now,
                &self.tuning,
                &self.picker,
            ) {
                grid_changed = true;
            }
        }

        // Derived quantities come from the fully resolved grid.
        let tally1 = economy::tally_owner(&state.grid, &duel.player1_id, &self.tuning);
        let tally2 = economy::tally_owner(&state.grid, &duel.player2_id, &self.tuning);

        state.player1_energy += tally1.rate as f64 / 1000.0 * d_energy as f64;
        state.player2_energy += tally2.rate as f64 / 1000.0 * d_energy as f64;
        state.player1_timer = state.player1_timer.saturating_sub(d_timer);
        state.player2_timer = state.player2_timer.saturating_sub(d_timer);

        // A player without a presence record counts as just seen.
        let last_seen1 = self
            .presence_of(&duel.player1_id)
            .await?
            .unwrap_or(now);
        let last_seen2 = self
            .presence_of(&duel.player2_id)
            .await?
            .unwrap_or(now);

        let winner_id = win::evaluate_winner(
            state.player1_timer,
            state.player2_timer,
            tally1.cells,
            tally2.cells,
            last_seen1,
            last_seen2,
            now,
            self.tuning.disconnect_threshold_ms,
        )
        .map(|side| match side {
            PlayerSide::PlayerOne => duel.player1_id.clone(),
            PlayerSide::PlayerTwo => duel.player2_id.clone(),
        });

        let patch = GameStatePatch {
            player1_energy: Some(state.player1_energy),
            player2_energy: Some(state.player2_energy),
            player1_timer: Some(state.player1_timer),
            player2_timer: Some(state.player2_timer),
            last_energy_update: Some(now),
            last_timer_update: Some(now),
            grid: grid_changed.then(|| state.grid.clone()),
        };
        self.store
            .patch_game_state(duel_id, patch)
            .await
            .map_err(|_| DuelError::StorageFailure)?;

        // The active -> completed transition happens here and only here.
        if let Some(winner) = &winner_id
            && duel.status == DuelStatus::Active
        {
            self.store
                .complete_duel(duel_id, winner, now)
                .await
                .map_err(|_| DuelError::StorageFailure)?;
            info!(duel_id, winner_id = %winner, "duel completed");
        }

        Ok(TickReport {
            player1_energy: state.player1_energy,
            player2_energy: state.player2_energy,
            player1_timer: state.player1_timer,
            player2_timer: state.player2_timer,
            player1_cells: tally1.cells,
            player2_cells: tally2.cells,
            player1_rate: tally1.rate,
            player2_rate: tally2.rate,
            player1_generators: tally1.generators,
            player2_generators: tally2.generators,
            winner_id,
            grid: grid_changed.then_some(state.grid),
        })
    }

    async fn presence_of(&self, player_id: &str) -> Result<Option<u64>, DuelError> {
        Ok(self
            .store
            .get_presence(player_id)
            .await
            .map_err(|_| DuelError::StorageFailure)?
            .map(|presence| presence.last_seen))
    }
}
