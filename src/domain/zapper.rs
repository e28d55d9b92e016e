// Resolution of one randomized zapper action against the grid.
//
// This is the simulation's only nondeterministic rule; the pick itself goes
// through the injected `TargetPicker` so tests can script outcomes.

use crate::domain::grid::{Cell, CellKind, GRID_SIZE, Grid};
use crate::domain::ports::TargetPicker;
use crate::domain::tuning::DuelTuning;

/// Every cell within Chebyshev distance `radius` of (row, col), excluding
/// the firing cell itself, clipped to the board. Row-major order.
pub fn zap_candidates(row: usize, col: usize, radius: usize) -> Vec<(usize, usize)> {
    let row_lo = row.saturating_sub(radius);
    let row_hi = (row + radius).min(GRID_SIZE - 1);
    let col_lo = col.saturating_sub(radius);
    let col_hi = (col + radius).min(GRID_SIZE - 1);

    let mut candidates = Vec::with_capacity((2 * radius + 1).pow(2) - 1);
    for r in row_lo..=row_hi {
        for c in col_lo..=col_hi {
            if (r, c) != (row, col) {
                candidates.push((r, c));
            }
        }
    }
    candidates
}

/// Resolves one zap from the owned zapper at (row, col): picks a single
/// nearby cell and converts it depending on its state. Returns whether the
/// grid changed.
///
/// Friendly non-generator cells become generators, opponent non-hardened and
/// neutral cells are captured as basic. Friendly generators and opponent
/// hardened cells are left alone.
pub fn resolve_zap(
    grid: &mut Grid,
    row: usize,
    col: usize,
    owner: &str,
    now: u64,
    tuning: &DuelTuning,
    picker: &dyn TargetPicker,
) -> bool {
    let candidates = zap_candidates(row, col, tuning.zap_radius);
    if candidates.is_empty() {
        return false;
    }

    let (target_row, target_col) = candidates[picker.pick_index(candidates.len())];
    let target = &mut grid.cells[target_row][target_col];

    let converted = match (&target.owner, target.kind) {
        (Some(id), CellKind::Generator) if id == owner => return false,
        (Some(id), _) if id == owner => CellKind::Generator,
        (Some(_), CellKind::Hardened) => return false,
        (Some(_), _) | (None, _) => CellKind::Basic,
    };

    *target = Cell {
        owner: Some(owner.to_string()),
        kind: converted,
        acquired_at: Some(now),
        last_zap_at: None,
    };
    true
}
