//! AI controller for the right paddle
//!
//! Proportional tracking: step toward the primary ball's vertical position
//! at a fixed per-tick speed set by difficulty. Only `balls[0]` is tracked,
//! even in multiball play; that is the documented behavior, not an
//! oversight. Inactive in two-player modes.

use super::state::GameState;

/// Move the opponent paddle one step toward the primary ball.
pub fn drive_opponent(state: &mut GameState) {
    let Some(target) = state.balls.first() else {
        return;
    };
    let target_y = target.pos.y;
    let step = state.difficulty.ai_speed();
    let center = state.opponent.center_y();
    if target_y < center {
        state.opponent.y -= step;
    } else if target_y > center {
        state.opponent.y += step;
    }
}
