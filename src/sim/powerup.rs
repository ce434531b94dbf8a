//! Power-up engine
//!
//! Stochastic pickup spawning, effect activation on ball contact and
//! scheduled effect reversal. Reversals are fire-and-forget: each activation
//! schedules its own due time and a later activation of the same kind does
//! not cancel an earlier one. Session end/restart cancels whatever is still
//! pending.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, GameState, Pickup};
use crate::consts::*;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// All ball velocities x1.5 for 5 seconds
    Speed,
    /// Human paddle height x1.5 for 5 seconds
    Size,
    /// Two extra balls, permanent
    MultiBall,
    /// All ball velocities halved for 3 seconds
    SlowMo,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::Speed,
        PickupKind::Size,
        PickupKind::MultiBall,
        PickupKind::SlowMo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupKind::Speed => "speed",
            PickupKind::Size => "size",
            PickupKind::MultiBall => "multiball",
            PickupKind::SlowMo => "slowmo",
        }
    }

    /// Pickup and burst color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            PickupKind::Speed => 0xff4444,
            PickupKind::Size => 0x44ff44,
            PickupKind::MultiBall => 0x4444ff,
            PickupKind::SlowMo => 0xffff44,
        }
    }
}

/// Which timed effect to undo when a reversal fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReversalKind {
    /// Divide every ball velocity by SPEED_FACTOR
    SpeedRestore,
    /// Reset the human paddle height to the base constant
    SizeRestore,
    /// Double every ball velocity
    SlowMoRestore,
}

/// A scheduled effect reversal with an explicit due time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingReversal {
    pub kind: ReversalKind,
    /// Wall-clock due time in milliseconds
    pub due_ms: f64,
}

/// Per-tick spawn roll: with a small fixed probability, and fewer than
/// MAX_PICKUPS present, place one pickup of uniform-random kind at a
/// uniform-random position inside the inset play area.
pub fn maybe_spawn(state: &mut GameState) {
    if state.pickups.len() >= MAX_PICKUPS {
        return;
    }
    if state.rng.random::<f64>() >= PICKUP_SPAWN_CHANCE {
        return;
    }
    let kind = PickupKind::ALL[state.rng.random_range(0..PickupKind::ALL.len())];
    let x = state.rng.random_range(PICKUP_INSET..BOARD_WIDTH - PICKUP_INSET);
    let y = state.rng.random_range(PICKUP_INSET..BOARD_HEIGHT - PICKUP_INSET);
    state.pickups.push(Pickup::new(Vec2::new(x, y), kind));
    log::debug!("pickup spawned: {} at ({x:.0}, {y:.0})", kind.as_str());
}

/// Apply a collected power-up and schedule its reversal (if timed).
pub fn activate(state: &mut GameState, kind: PickupKind, now_ms: f64) {
    log::debug!("power-up activated: {}", kind.as_str());
    match kind {
        PickupKind::Speed => {
            for ball in &mut state.balls {
                ball.vel *= SPEED_FACTOR;
            }
            state.pending_reversals.push(PendingReversal {
                kind: ReversalKind::SpeedRestore,
                due_ms: now_ms + SPEED_DURATION_MS,
            });
        }
        PickupKind::Size => {
            state.player.height *= SIZE_FACTOR;
            state.pending_reversals.push(PendingReversal {
                kind: ReversalKind::SizeRestore,
                due_ms: now_ms + SIZE_DURATION_MS,
            });
        }
        PickupKind::MultiBall => {
            for _ in 0..MULTIBALL_COUNT {
                let vel = Vec2::new(
                    (state.rng.random::<f32>() - 0.5) * 2.0 * RESERVE_SPREAD,
                    (state.rng.random::<f32>() - 0.5) * 2.0 * RESERVE_SPREAD,
                );
                let mut ball = Ball::new(state.ball_skin);
                ball.vel = vel;
                state.balls.push(ball);
            }
        }
        PickupKind::SlowMo => {
            for ball in &mut state.balls {
                ball.vel *= 0.5;
            }
            state.pending_reversals.push(PendingReversal {
                kind: ReversalKind::SlowMoRestore,
                due_ms: now_ms + SLOWMO_DURATION_MS,
            });
        }
    }
}

/// Fire every reversal whose due time has passed. Reversals apply to
/// whatever balls exist at fire time, including balls spawned after the
/// activation (reference behavior).
pub fn fire_due_reversals(state: &mut GameState, now_ms: f64) {
    let mut i = 0;
    while i < state.pending_reversals.len() {
        if state.pending_reversals[i].due_ms <= now_ms {
            let reversal = state.pending_reversals.remove(i);
            apply_reversal(state, reversal.kind);
        } else {
            i += 1;
        }
    }
}

fn apply_reversal(state: &mut GameState, kind: ReversalKind) {
    log::debug!("power-up reversal: {kind:?}");
    match kind {
        ReversalKind::SpeedRestore => {
            for ball in &mut state.balls {
                ball.vel /= SPEED_FACTOR;
            }
        }
        ReversalKind::SizeRestore => {
            state.player.height = PADDLE_HEIGHT;
        }
        ReversalKind::SlowMoRestore => {
            for ball in &mut state.balls {
                ball.vel *= 2.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallSkin;

    fn state_with_ball() -> GameState {
        GameState::new(42)
    }

    #[test]
    fn test_speed_round_trip() {
        let mut state = state_with_ball();
        let before = state.balls[0].vel;

        activate(&mut state, PickupKind::Speed, 1000.0);
        assert_eq!(state.balls[0].vel, before * SPEED_FACTOR);
        assert_eq!(state.pending_reversals.len(), 1);

        // Not due yet
        fire_due_reversals(&mut state, 5999.0);
        assert_eq!(state.pending_reversals.len(), 1);

        fire_due_reversals(&mut state, 6000.0);
        assert!(state.pending_reversals.is_empty());
        assert!((state.balls[0].vel - before).length() < 1e-5);
    }

    #[test]
    fn test_speed_reversal_is_unconditional_over_new_balls() {
        let mut state = state_with_ball();
        activate(&mut state, PickupKind::Speed, 0.0);

        // A ball created after the activation still gets divided on fire
        let mut late = Ball::new(BallSkin::Classic);
        late.vel = Vec2::new(3.0, 3.0);
        state.balls.push(late);

        fire_due_reversals(&mut state, SPEED_DURATION_MS);
        assert_eq!(state.balls[1].vel, Vec2::new(3.0, 3.0) / SPEED_FACTOR);
    }

    #[test]
    fn test_size_resets_to_base_height() {
        let mut state = state_with_ball();
        activate(&mut state, PickupKind::Size, 0.0);
        assert_eq!(state.player.height, PADDLE_HEIGHT * SIZE_FACTOR);

        // Second activation stacks multiplicatively...
        activate(&mut state, PickupKind::Size, 100.0);
        assert_eq!(state.player.height, PADDLE_HEIGHT * SIZE_FACTOR * SIZE_FACTOR);

        // ...but the first reversal snaps straight back to the base constant
        fire_due_reversals(&mut state, SIZE_DURATION_MS);
        assert_eq!(state.player.height, PADDLE_HEIGHT);
    }

    #[test]
    fn test_multiball_adds_two_balls_in_range() {
        let mut state = state_with_ball();
        state.ball_skin = BallSkin::Fire;
        activate(&mut state, PickupKind::MultiBall, 0.0);

        assert_eq!(state.balls.len(), 1 + MULTIBALL_COUNT);
        for ball in &state.balls[1..] {
            assert_eq!(ball.skin, BallSkin::Fire);
            assert!(ball.vel.x.abs() <= RESERVE_SPREAD);
            assert!(ball.vel.y.abs() <= RESERVE_SPREAD);
            assert!(ball.trail.is_empty());
        }
        // No reversal: multiballs persist
        assert!(state.pending_reversals.is_empty());
    }

    #[test]
    fn test_slowmo_halves_then_doubles() {
        let mut state = state_with_ball();
        let before = state.balls[0].vel;

        activate(&mut state, PickupKind::SlowMo, 0.0);
        assert_eq!(state.balls[0].vel, before * 0.5);

        fire_due_reversals(&mut state, SLOWMO_DURATION_MS);
        assert_eq!(state.balls[0].vel, before);
    }

    #[test]
    fn test_reversal_timers_are_independent() {
        let mut state = state_with_ball();
        activate(&mut state, PickupKind::Speed, 0.0);
        activate(&mut state, PickupKind::Speed, 1000.0);
        assert_eq!(state.pending_reversals.len(), 2);

        fire_due_reversals(&mut state, SPEED_DURATION_MS);
        assert_eq!(state.pending_reversals.len(), 1);

        fire_due_reversals(&mut state, 1000.0 + SPEED_DURATION_MS);
        assert!(state.pending_reversals.is_empty());
    }

    #[test]
    fn test_spawn_respects_cap_and_inset() {
        let mut state = state_with_ball();
        for _ in 0..20_000 {
            maybe_spawn(&mut state);
            assert!(state.pickups.len() <= MAX_PICKUPS);
        }
        // With 20k rolls at 0.3% the cap is certainly reached
        assert_eq!(state.pickups.len(), MAX_PICKUPS);
        for pickup in &state.pickups {
            assert!(pickup.pos.x >= PICKUP_INSET);
            assert!(pickup.pos.x <= BOARD_WIDTH - PICKUP_INSET);
            assert!(pickup.pos.y >= PICKUP_INSET);
            assert!(pickup.pos.y <= BOARD_HEIGHT - PICKUP_INSET);
        }
    }
}
