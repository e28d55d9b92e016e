use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::domain::ports::{Clock, DuelStore, GameStatePatch, TargetPicker};
use crate::domain::state::{Duel, DuelStatus, GameState, PlayerPresence};
use crate::domain::tuning::DuelTuning;

// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: InMemoryDuelStore,
    pub tuning: DuelTuning,
}

#[derive(Default)]
struct DuelRecords {
    duels: HashMap<String, Duel>,
    // Game states are keyed by duel id (1:1).
    game_states: HashMap<String, GameState>,
    presence: HashMap<String, PlayerPresence>,
}

// In-memory duel store adapter. The single mutex is the per-record
// serialization boundary: every read-modify-write on a duel's records runs
// its store calls through here, so concurrent tick and purchase calls
// resolve to last-write-commits rather than torn records.
#[derive(Clone, Default)]
pub struct InMemoryDuelStore {
    records: Arc<Mutex<DuelRecords>>,
}

#[async_trait]
impl DuelStore for InMemoryDuelStore {
    async fn insert_duel(&self, duel: Duel, state: GameState) -> Result<(), String> {
        let mut records = self.records.lock().await;
        records.game_states.insert(duel.id.clone(), state);
        records.duels.insert(duel.id.clone(), duel);
        Ok(())
    }

    async fn get_duel(&self, duel_id: &str) -> Result<Option<Duel>, String> {
        let records = self.records.lock().await;
        Ok(records.duels.get(duel_id).cloned())
    }

    async fn get_game_state(&self, duel_id: &str) -> Result<Option<GameState>, String> {
        let records = self.records.lock().await;
        Ok(records.game_states.get(duel_id).cloned())
    }

    async fn patch_game_state(&self, duel_id: &str, patch: GameStatePatch) -> Result<(), String> {
        let mut records = self.records.lock().await;
        let state = records
            .game_states
            .get_mut(duel_id)
            .ok_or_else(|| format!("game state not found for duel {duel_id}"))?;
        patch.apply(state);
        Ok(())
    }

    async fn complete_duel(
        &self,
        duel_id: &str,
        winner_id: &str,
        completed_at: u64,
    ) -> Result<(), String> {
        let mut records = self.records.lock().await;
        let duel = records
            .duels
            .get_mut(duel_id)
            .ok_or_else(|| format!("duel {duel_id} not found"))?;
        duel.status = DuelStatus::Completed;
        duel.winner_id = Some(winner_id.to_string());
        duel.completed_at = Some(completed_at);
        Ok(())
    }

    async fn get_presence(&self, player_id: &str) -> Result<Option<PlayerPresence>, String> {
        let records = self.records.lock().await;
        Ok(records.presence.get(player_id).copied())
    }

    async fn touch_presence(&self, player_id: &str, last_seen: u64) -> Result<(), String> {
        let mut records = self.records.lock().await;
        records
            .presence
            .insert(player_id.to_string(), PlayerPresence { last_seen });
        Ok(())
    }
}

// System clock adapter used by the duel use cases.
#[derive(Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

// Thread-local random source backing the zapper's uniform target pick.
#[derive(Clone, Copy, Default)]
pub struct UniformPicker;

impl TargetPicker for UniformPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
