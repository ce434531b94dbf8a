//! Power Pong - a ball-and-paddle arcade game core
//!
//! All gameplay logic lives in `sim`: physics, collisions, power-ups,
//! particles and the match state machine. The crate is renderer-agnostic;
//! a host drives it with one `tick` per frame and draws from the resulting
//! state snapshot.

pub mod sim;

pub use sim::{GameState, StartConfig, StartError, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Board dimensions in logical pixels
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 400.0;

    /// Nominal simulation rate (velocities are pixels per tick)
    pub const TICKS_PER_SECOND: u64 = 60;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Keyboard paddle speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Left paddle x; the right paddle sits at BOARD_WIDTH - 2 * PADDLE_WIDTH
    pub const PLAYER_X: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Initial per-axis ball velocity at serve
    pub const BALL_START_SPEED: f32 = 4.0;
    /// Re-serve vertical velocity is drawn from [-RESERVE_SPREAD, RESERVE_SPREAD]
    pub const RESERVE_SPREAD: f32 = 4.0;
    /// Maximum trail points per ball
    pub const TRAIL_LENGTH: usize = 10;
    /// Deflection factor applied to the ball/paddle center offset
    pub const DEFLECT_FACTOR: f32 = 0.15;

    /// Power-up pickups
    pub const PICKUP_SIZE: f32 = 20.0;
    /// Spawn probability per running tick
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.003;
    /// Maximum concurrent pickups on the board
    pub const MAX_PICKUPS: usize = 2;
    /// Pickups spawn this far inside the board edges
    pub const PICKUP_INSET: f32 = 20.0;
    /// Speed power-up velocity multiplier
    pub const SPEED_FACTOR: f32 = 1.5;
    pub const SPEED_DURATION_MS: f64 = 5000.0;
    /// Size power-up paddle-height multiplier
    pub const SIZE_FACTOR: f32 = 1.5;
    pub const SIZE_DURATION_MS: f64 = 5000.0;
    pub const SLOWMO_DURATION_MS: f64 = 3000.0;
    /// Balls added per multiball activation
    pub const MULTIBALL_COUNT: usize = 2;

    /// Particles
    pub const BURST_COUNT: usize = 15;
    /// Burst velocities are drawn from [-BURST_SPREAD, BURST_SPREAD] per axis
    pub const BURST_SPREAD: f32 = 5.0;
    /// Initial particle lifetime in ticks
    pub const PARTICLE_LIFE: f32 = 30.0;
    /// Per-axis velocity damping per tick
    pub const PARTICLE_DRAG: f32 = 0.98;
    /// Population cap; the oldest particle is evicted when full
    pub const MAX_PARTICLES: usize = 256;

    /// Win condition: first to WIN_SCORE with a lead of WIN_MARGIN
    pub const WIN_SCORE: u32 = 3;
    pub const WIN_MARGIN: u32 = 2;

    /// Side colors (0xRRGGBB)
    pub const PLAYER_COLOR: u32 = 0x4cc9f0;
    pub const OPPONENT_COLOR: u32 = 0xf72585;
    pub const WALL_BURST_COLOR: u32 = 0xffffff;

    /// Score bursts spawn this far inside the scored-on edge
    pub const SCORE_BURST_INSET: f32 = 50.0;
}
