/// Gameplay tuning for the duel simulation.
///
/// Keep this separate from runtime/server configuration (ports, buffer
/// sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct DuelTuning {
    /// Cost of a player's very first cell.
    pub base_cell_cost: u64,

    /// Geometric growth factor applied per already-owned cell.
    pub cost_growth: f64,

    /// Multiplier on the base cost when capturing an opponent cell.
    pub capture_multiplier: u64,

    /// Flat surcharges on top of the base cost for special expansions.
    pub hardened_surcharge: u64,
    pub generator_surcharge: u64,
    pub zapper_surcharge: u64,

    /// Flat energy production per cell, per second.
    pub basic_rate: u64,
    pub hardened_rate: u64,
    pub zapper_rate: u64,

    /// Generator synergy bonus: floor(base * g * growth^(g-1)) once per
    /// player, not per generator.
    pub generator_bonus_base: u64,
    pub generator_bonus_growth: f64,

    /// A generator reverts to neutral once it reaches this age.
    pub generator_lifetime_ms: u64,

    /// Minimum time between zap actions from one zapper cell.
    pub zap_cooldown_ms: u64,

    /// Chebyshev radius of the zap target box.
    pub zap_radius: usize,

    /// Countdown value a purchase resets the buyer's timer to.
    pub timer_reset_ms: u64,

    /// Presence silence beyond this forfeits the duel.
    pub disconnect_threshold_ms: u64,
}

impl Default for DuelTuning {
    fn default() -> Self {
        Self {
            base_cell_cost: 20,
            cost_growth: 1.25,
            capture_multiplier: 2,
            hardened_surcharge: 700,
            generator_surcharge: 100,
            zapper_surcharge: 500,
            basic_rate: 10,
            hardened_rate: 40,
            zapper_rate: 30,
            generator_bonus_base: 50,
            generator_bonus_growth: 1.5,
            generator_lifetime_ms: 20_000,
            zap_cooldown_ms: 5_000,
            zap_radius: 2,
            timer_reset_ms: 20_000,
            disconnect_threshold_ms: 120_000,
        }
    }
}
