//! Fixed timestep simulation tick
//!
//! One `tick` call advances the whole session: scheduled reversals, input,
//! power-up spawning, particles, per-ball physics, AI and the end-condition
//! check. Velocities are pixels per tick; the host calls this once per
//! frame at the nominal 60 Hz.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use super::{ai, collision, particles, powerup};
use crate::consts::*;

/// Input state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow keys, left paddle
    pub up: bool,
    pub down: bool,
    /// W/S keys, right paddle in two-player modes
    pub w: bool,
    pub s: bool,
    /// Absolute pointer y for the left paddle; applied before key motion
    pub pointer_y: Option<f32>,
    /// Pause toggle; edge-triggered, send true for exactly one tick
    pub pause: bool,
}

/// Advance the session by one tick. `now_ms` is the host wall clock in
/// milliseconds; scheduled power-up reversals fire against it even while
/// the session is paused.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    powerup::fire_due_reversals(state, now_ms);

    if input.pause {
        state.toggle_pause();
        if state.phase == GamePhase::Paused {
            return;
        }
    }
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    if state.mode.is_survival() {
        state.survival_ticks += 1;
    }

    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    apply_paddle_input(state, input);

    powerup::maybe_spawn(state);
    particles::update(&mut state.particles);

    step_balls(state, now_ms);
    if state.phase != GamePhase::Running {
        // Survival concession ends the match mid-step
        return;
    }

    if !state.mode.is_two_player() {
        ai::drive_opponent(state);
    }

    state.player.clamp_to_board();
    state.opponent.clamp_to_board();

    if !state.mode.is_survival() && state.win_reached() {
        state.end();
    }
}

/// Key/pointer motion for the human paddle(s). Clamping happens later in
/// the tick, after the AI has also moved.
fn apply_paddle_input(state: &mut GameState, input: &TickInput) {
    if let Some(pointer_y) = input.pointer_y {
        state.player.y = pointer_y - state.player.height / 2.0;
    }
    if input.up {
        state.player.y -= state.player.speed;
    }
    if input.down {
        state.player.y += state.player.speed;
    }
    if state.mode.is_two_player() {
        if input.w {
            state.opponent.y -= state.opponent.speed;
        }
        if input.s {
            state.opponent.y += state.opponent.speed;
        }
    }
}

/// Advance every active ball: integrate, then check wall, left paddle,
/// right paddle, pickups and scoring in that order. The checks are not
/// mutually exclusive; a ball can bounce off a wall and a paddle in the
/// same tick. Balls pushed mid-tick by multiball are first stepped on the
/// next tick.
fn step_balls(state: &mut GameState, now_ms: f64) {
    let ball_count = state.balls.len();
    for i in 0..ball_count {
        // Integrate position and bounce off the horizontal walls
        let mut wall_burst = None;
        {
            let ball = &mut state.balls[i];
            ball.pos += ball.vel;
            if ball.pos.y - ball.radius < 0.0 || ball.pos.y + ball.radius > BOARD_HEIGHT {
                ball.vel.y = -ball.vel.y;
                wall_burst = Some(ball.pos);
            }
        }
        if let Some(origin) = wall_burst {
            particles::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                origin,
                WALL_BURST_COLOR,
                BURST_COUNT,
            );
        }

        // Left (human) paddle
        let hit_left = {
            let ball = &state.balls[i];
            collision::ball_hits_left_paddle(ball.pos, ball.radius, ball.vel, &state.player)
        };
        if hit_left {
            let origin = {
                let deflect = collision::deflection(state.balls[i].pos.y, &state.player);
                let ball = &mut state.balls[i];
                ball.vel.x = -ball.vel.x;
                ball.vel.y = deflect;
                ball.pos
            };
            particles::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                origin,
                PLAYER_COLOR,
                BURST_COUNT,
            );
            state.screen_shake = 1.0;
        }

        // Right paddle (AI or player 2)
        let hit_right = {
            let ball = &state.balls[i];
            collision::ball_hits_right_paddle(ball.pos, ball.radius, ball.vel, &state.opponent)
        };
        if hit_right {
            let origin = {
                let deflect = collision::deflection(state.balls[i].pos.y, &state.opponent);
                let ball = &mut state.balls[i];
                ball.vel.x = -ball.vel.x;
                ball.vel.y = deflect;
                ball.pos
            };
            particles::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                origin,
                OPPONENT_COLOR,
                BURST_COUNT,
            );
            state.screen_shake = 1.0;
        }

        // Pickup collection: burst at the pickup center, then apply the
        // effect (which may mutate every ball, so the ball borrow ends first)
        let collected: Vec<usize> = {
            let ball = &state.balls[i];
            state
                .pickups
                .iter()
                .enumerate()
                .filter(|&(_, pickup)| {
                    collision::ball_pickup_overlap(ball.pos, ball.radius, pickup)
                })
                .map(|(idx, _)| idx)
                .collect()
        };
        for idx in collected.into_iter().rev() {
            let pickup = state.pickups.remove(idx);
            particles::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                pickup.center(),
                pickup.kind.color(),
                BURST_COUNT,
            );
            powerup::activate(state, pickup.kind, now_ms);
        }

        // Scoring: the trailing edge must fully cross the boundary
        let (past_left, past_right) = {
            let ball = &state.balls[i];
            (
                ball.pos.x + ball.radius < 0.0,
                ball.pos.x - ball.radius > BOARD_WIDTH,
            )
        };
        if past_left {
            if state.mode.is_survival() {
                // Conceding the human boundary ends a survival match at once
                state.end();
                return;
            }
            state.opponent_score += 1;
            state.reset_ball(i);
            particles::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                Vec2::new(SCORE_BURST_INSET, BOARD_HEIGHT / 2.0),
                OPPONENT_COLOR,
                BURST_COUNT,
            );
        } else if past_right {
            state.player_score += 1;
            state.reset_ball(i);
            particles::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                Vec2::new(BOARD_WIDTH - SCORE_BURST_INSET, BOARD_HEIGHT / 2.0),
                PLAYER_COLOR,
                BURST_COUNT,
            );
        }

        state.balls[i].record_trail();
    }
}
