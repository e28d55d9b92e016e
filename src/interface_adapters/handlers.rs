use crate::domain::errors::DuelError;
use crate::domain::grid::{CellKind, Grid};
use crate::domain::ports::{Clock, DuelStore};
use crate::interface_adapters::protocol::{
    DuelSnapshotResponse, ErrorResponse, HeartbeatRequest, HeartbeatResponse, PurchaseRequest,
    PurchaseResponse, StartDuelRequest, StartDuelResponse, TickRequest, TickResponse,
};
use crate::interface_adapters::state::{AppState, SystemClock, UniformPicker};
use crate::use_cases::purchase::PurchaseUseCase;
use crate::use_cases::start_duel::StartDuelUseCase;
use crate::use_cases::tick::TickUseCase;
use axum::{Json, extract::Path, extract::State, http::StatusCode};

// Handler for creating an active duel with its seeded game state.
pub async fn start_duel(
    State(state): State<AppState>,
    Json(payload): Json<StartDuelRequest>,
) -> Result<(StatusCode, Json<StartDuelResponse>), (StatusCode, Json<ErrorResponse>)> {
    let use_case = StartDuelUseCase {
        clock: SystemClock,
        store: state.store.clone(),
        tuning: state.tuning,
    };

    let result = use_case
        .execute(payload.player1_id, payload.player2_id)
        .await
        .map_err(map_duel_error)?;

    Ok((
        StatusCode::CREATED,
        Json(StartDuelResponse {
            duel_id: result.duel_id,
        }),
    ))
}

// Handler for the polling tick that advances one duel.
pub async fn tick(
    State(state): State<AppState>,
    Json(payload): Json<TickRequest>,
) -> Result<Json<TickResponse>, (StatusCode, Json<ErrorResponse>)> {
    let use_case = TickUseCase {
        clock: SystemClock,
        store: state.store.clone(),
        picker: UniformPicker,
        tuning: state.tuning,
    };

    let report = use_case
        .execute(&payload.duel_id)
        .await
        .map_err(map_duel_error)?;

    Ok(Json(TickResponse {
        player1_energy: report.player1_energy,
        player2_energy: report.player2_energy,
        player1_timer: report.player1_timer,
        player2_timer: report.player2_timer,
        player1_cells: report.player1_cells,
        player2_cells: report.player2_cells,
        player1_rate: report.player1_rate,
        player2_rate: report.player2_rate,
        player1_generators: report.player1_generators,
        player2_generators: report.player2_generators,
        winner_id: report.winner_id,
        grid: report.grid,
    }))
}

// Handler for a player-initiated cell purchase. Coordinate bounds and the
// requested kind are validated once here, at the boundary.
pub async fn purchase(
    State(state): State<AppState>,
    Json(payload): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !Grid::in_bounds(payload.row, payload.col) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "coordinates out of bounds",
        ));
    }
    let requested = payload.kind.unwrap_or(CellKind::Basic);
    if requested == CellKind::Neutral {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "cannot purchase a neutral cell",
        ));
    }

    let use_case = PurchaseUseCase {
        clock: SystemClock,
        store: state.store.clone(),
        tuning: state.tuning,
    };

    let receipt = use_case
        .execute(
            &payload.duel_id,
            &payload.player_id,
            payload.row,
            payload.col,
            requested,
        )
        .await
        .map_err(map_duel_error)?;

    Ok(Json(PurchaseResponse {
        success: true,
        cost: receipt.cost,
        new_energy: receipt.new_energy,
        kind: receipt.kind,
    }))
}

// Handler for fetching a duel with its game state.
pub async fn duel_snapshot(
    State(state): State<AppState>,
    Path(duel_id): Path<String>,
) -> Result<Json<DuelSnapshotResponse>, (StatusCode, Json<ErrorResponse>)> {
    let duel = state
        .store
        .get_duel(&duel_id)
        .await
        .map_err(|_| map_duel_error(DuelError::StorageFailure))?
        .ok_or_else(|| map_duel_error(DuelError::NotFound))?;
    let game_state = state
        .store
        .get_game_state(&duel_id)
        .await
        .map_err(|_| map_duel_error(DuelError::StorageFailure))?
        .ok_or_else(|| map_duel_error(DuelError::NotFound))?;

    Ok(Json(DuelSnapshotResponse { duel, game_state }))
}

// Handler for recording a presence heartbeat.
pub async fn heartbeat(
    State(state): State<AppState>,
    Json(payload): Json<HeartbeatRequest>,
) -> Result<Json<HeartbeatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let now = SystemClock.now_epoch_ms();
    state
        .store
        .touch_presence(&payload.player_id, now)
        .await
        .map_err(|_| map_duel_error(DuelError::StorageFailure))?;

    Ok(Json(HeartbeatResponse { last_seen: now }))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

// Maps domain errors to HTTP responses.
fn map_duel_error(err: DuelError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        DuelError::NotFound => error_response(StatusCode::NOT_FOUND, "duel not found"),
        DuelError::InvalidState => {
            error_response(StatusCode::CONFLICT, "duel is not active for this action")
        }
        DuelError::AlreadyOwned => error_response(StatusCode::CONFLICT, "cell is already yours"),
        DuelError::Uncapturable => {
            error_response(StatusCode::CONFLICT, "hardened cells cannot be captured")
        }
        DuelError::NotAdjacent => {
            error_response(StatusCode::CONFLICT, "must expand from adjacent territory")
        }
        DuelError::InsufficientResources => {
            error_response(StatusCode::CONFLICT, "insufficient energy")
        }
        DuelError::StorageFailure => error_response(StatusCode::BAD_GATEWAY, "storage error"),
    }
}
