// Creates an active duel with its seeded game state. Invitation lifecycle
// lives in an external service; this runs once an invitation is accepted.

use uuid::Uuid;

use crate::domain::errors::DuelError;
use crate::domain::grid::Grid;
use crate::domain::ports::{Clock, DuelStore};
use crate::domain::state::{Duel, DuelStatus, GameState};
use crate::domain::tuning::DuelTuning;

pub struct NewDuel {
    pub duel_id: String,
}

// Start-duel use case with injected dependencies.
pub struct StartDuelUseCase<C, S> {
    pub clock: C,
    pub store: S,
    pub tuning: DuelTuning,
}

impl<C, S> StartDuelUseCase<C, S>
where
    C: Clock,
    S: DuelStore,
{
    pub async fn execute(
        &self,
        player1_id: String,
        player2_id: String,
    ) -> Result<NewDuel, DuelError> {
        if player1_id.is_empty() || player2_id.is_empty() || player1_id == player2_id {
            return Err(DuelError::InvalidState);
        }

        let now = self.clock.now_epoch_ms();
        let duel_id = Uuid::new_v4().to_string();

        let duel = Duel {
            id: duel_id.clone(),
            player1_id: player1_id.clone(),
            player2_id: player2_id.clone(),
            status: DuelStatus::Active,
            winner_id: None,
            created_at: now,
            started_at: Some(now),
            completed_at: None,
        };
        let state = GameState {
            duel_id: duel_id.clone(),
            player1_energy: 0.0,
            player2_energy: 0.0,
            player1_timer: self.tuning.timer_reset_ms,
            player2_timer: self.tuning.timer_reset_ms,
            last_energy_update: now,
            last_timer_update: now,
            grid: Grid::new_seeded(&player1_id, &player2_id, now),
        };

        self.store
            .insert_duel(duel, state)
            .await
            .map_err(|_| DuelError::StorageFailure)?;

        // Start the disconnect clocks at duel start so a player who never
        // reports presence is not forfeited retroactively.
        for player_id in [&player1_id, &player2_id] {
            self.store
                .touch_presence(player_id, now)
                .await
                .map_err(|_| DuelError::StorageFailure)?;
        }

        Ok(NewDuel { duel_id })
    }
}
