// Winner decision for one tick, exposed standalone for isolated testing.

use crate::domain::state::PlayerSide;

/// Decides the duel outcome for the current instant, if any.
///
/// Precedence: both timers expired -> the greater-or-equal cell count wins
/// (exact ties go to player one); exactly one timer expired -> the other
/// side wins. A disconnect is evaluated last and overrides any timer result.
/// Player one's staleness is checked before player two's, so a simultaneous
/// double disconnect resolves to a player-two win.
pub fn evaluate_winner(
    timer1: u64,
    timer2: u64,
    cells1: u32,
    cells2: u32,
    last_seen1: u64,
    last_seen2: u64,
    now: u64,
    disconnect_threshold_ms: u64,
) -> Option<PlayerSide> {
    let mut winner = if timer1 == 0 && timer2 == 0 {
        if cells1 >= cells2 {
            Some(PlayerSide::PlayerOne)
        } else {
            Some(PlayerSide::PlayerTwo)
        }
    } else if timer1 == 0 {
        Some(PlayerSide::PlayerTwo)
    } else if timer2 == 0 {
        Some(PlayerSide::PlayerOne)
    } else {
        None
    };

    if now.saturating_sub(last_seen1) > disconnect_threshold_ms {
        winner = Some(PlayerSide::PlayerTwo);
    } else if now.saturating_sub(last_seen2) > disconnect_threshold_ms {
        winner = Some(PlayerSide::PlayerOne);
    }

    winner
}
