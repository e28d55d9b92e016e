use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::grid::Grid;
use crate::domain::ports::{Clock, DuelStore, GameStatePatch, TargetPicker};
use crate::domain::state::{Duel, DuelStatus, GameState, PlayerPresence};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> u64 {
        self.0
    }
}

// Picker replaying a scripted index sequence; panics when a test zaps more
// often than it scripted.
pub(crate) struct ScriptedPicker(Mutex<Vec<usize>>);

impl ScriptedPicker {
    pub(crate) fn new(indices: impl Into<Vec<usize>>) -> Self {
        let mut indices = indices.into();
        indices.reverse();
        Self(Mutex::new(indices))
    }

    // For ticks that must not fire any zapper.
    pub(crate) fn unused() -> Self {
        Self::new([])
    }
}

impl TargetPicker for ScriptedPicker {
    fn pick_index(&self, len: usize) -> usize {
        let index = self
            .0
            .lock()
            .expect("picker mutex poisoned")
            .pop()
            .expect("picker script exhausted");
        assert!(index < len, "scripted index {index} out of range {len}");
        index
    }
}

#[derive(Default)]
struct Records {
    duels: HashMap<String, Duel>,
    states: HashMap<String, GameState>,
    presence: HashMap<String, PlayerPresence>,
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub patch: bool,
}

// Shared in-memory records let tests inspect what execute() persisted.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    records: Arc<Mutex<Records>>,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Records::default())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_duel(&self, duel: Duel, state: GameState) {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        guard.states.insert(duel.id.clone(), state);
        guard.duels.insert(duel.id.clone(), duel);
    }

    pub(crate) fn set_presence(&self, player_id: &str, last_seen: u64) {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        guard
            .presence
            .insert(player_id.to_string(), PlayerPresence { last_seen });
    }

    pub(crate) fn duel(&self, duel_id: &str) -> Option<Duel> {
        let guard = self.records.lock().expect("records mutex poisoned");
        guard.duels.get(duel_id).cloned()
    }

    pub(crate) fn game_state(&self, duel_id: &str) -> Option<GameState> {
        let guard = self.records.lock().expect("records mutex poisoned");
        guard.states.get(duel_id).cloned()
    }

    pub(crate) fn presence(&self, player_id: &str) -> Option<PlayerPresence> {
        let guard = self.records.lock().expect("records mutex poisoned");
        guard.presence.get(player_id).copied()
    }
}

#[async_trait]
impl DuelStore for RecordingStore {
    async fn insert_duel(&self, duel: Duel, state: GameState) -> Result<(), String> {
        self.insert_test_duel(duel, state);
        Ok(())
    }

    async fn get_duel(&self, duel_id: &str) -> Result<Option<Duel>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        Ok(self.duel(duel_id))
    }

    async fn get_game_state(&self, duel_id: &str) -> Result<Option<GameState>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }
        Ok(self.game_state(duel_id))
    }

    async fn patch_game_state(&self, duel_id: &str, patch: GameStatePatch) -> Result<(), String> {
        if self.failures.patch {
            return Err("patch failed".to_string());
        }
        let mut guard = self.records.lock().expect("records mutex poisoned");
        let state = guard
            .states
            .get_mut(duel_id)
            .ok_or_else(|| "game state not found".to_string())?;
        patch.apply(state);
        Ok(())
    }

    async fn complete_duel(
        &self,
        duel_id: &str,
        winner_id: &str,
        completed_at: u64,
    ) -> Result<(), String> {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        let duel = guard
            .duels
            .get_mut(duel_id)
            .ok_or_else(|| "duel not found".to_string())?;
        duel.status = DuelStatus::Completed;
        duel.winner_id = Some(winner_id.to_string());
        duel.completed_at = Some(completed_at);
        Ok(())
    }

    async fn get_presence(&self, player_id: &str) -> Result<Option<PlayerPresence>, String> {
        Ok(self.presence(player_id))
    }

    async fn touch_presence(&self, player_id: &str, last_seen: u64) -> Result<(), String> {
        self.set_presence(player_id, last_seen);
        Ok(())
    }
}

// Fresh active duel between "p1" and "p2" with the standard seeded board,
// both presences just seen.
pub(crate) fn seeded_duel(store: &RecordingStore, duel_id: &str, now: u64) {
    let duel = Duel {
        id: duel_id.to_string(),
        player1_id: "p1".to_string(),
        player2_id: "p2".to_string(),
        status: DuelStatus::Active,
        winner_id: None,
        created_at: now,
        started_at: Some(now),
        completed_at: None,
    };
    let state = GameState {
        duel_id: duel_id.to_string(),
        player1_energy: 0.0,
        player2_energy: 0.0,
        player1_timer: 20_000,
        player2_timer: 20_000,
        last_energy_update: now,
        last_timer_update: now,
        grid: Grid::new_seeded("p1", "p2", now),
    };
    store.insert_test_duel(duel, state);
    store.set_presence("p1", now);
    store.set_presence("p2", now);
}
