// Pure pricing and production rules for the cell economy.

use crate::domain::grid::{CellKind, Grid};
use crate::domain::tuning::DuelTuning;

/// Expansion tax: 20 for the first cell, then floor(20 * 1.25^n) where `n`
/// is the buyer's owned-cell count before the purchase.
pub fn base_cost(owned_cells: u32, tuning: &DuelTuning) -> u64 {
    if owned_cells == 0 {
        return tuning.base_cell_cost;
    }
    (tuning.base_cell_cost as f64 * tuning.cost_growth.powi(owned_cells as i32)).floor() as u64
}

/// Prices a purchase and resolves the kind the cell will become.
///
/// Capturing an opponent cell costs double the base cost regardless of the
/// requested kind and always resolves to basic. Expansion onto neutral
/// ground honors the requested kind plus its surcharge.
pub fn purchase_cost(
    owned_cells: u32,
    requested: CellKind,
    is_capture: bool,
    tuning: &DuelTuning,
) -> (u64, CellKind) {
    let base = base_cost(owned_cells, tuning);
    if is_capture {
        return (base * tuning.capture_multiplier, CellKind::Basic);
    }
    match requested {
        CellKind::Hardened => (base + tuning.hardened_surcharge, CellKind::Hardened),
        CellKind::Generator => (base + tuning.generator_surcharge, CellKind::Generator),
        CellKind::Zapper => (base + tuning.zapper_surcharge, CellKind::Zapper),
        CellKind::Basic | CellKind::Neutral => (base, CellKind::Basic),
    }
}

/// Per-player grid totals recomputed after every tick resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerTally {
    pub cells: u32,
    pub generators: u32,
    /// Energy production in units per second.
    pub rate: u64,
}

/// Walks the grid and derives one player's cell count, generator count, and
/// production rate. Generators do not add a flat per-cell rate; owning
/// `g > 0` of them adds a single exponential synergy bonus instead.
pub fn tally_owner(grid: &Grid, player_id: &str, tuning: &DuelTuning) -> OwnerTally {
    let mut tally = OwnerTally::default();
    for cell in grid.cells.iter().flatten() {
        if !cell.owned_by(player_id) {
            continue;
        }
        tally.cells += 1;
        match cell.kind {
            CellKind::Basic => tally.rate += tuning.basic_rate,
            CellKind::Hardened => tally.rate += tuning.hardened_rate,
            CellKind::Zapper => tally.rate += tuning.zapper_rate,
            CellKind::Generator => tally.generators += 1,
            CellKind::Neutral => {}
        }
    }
    if tally.generators > 0 {
        let g = tally.generators;
        tally.rate += (tuning.generator_bonus_base as f64
            * g as f64
            * tuning.generator_bonus_growth.powi(g as i32 - 1))
        .floor() as u64;
    }
    tally
}
