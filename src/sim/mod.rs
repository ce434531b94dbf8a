//! Game simulation module
//!
//! All gameplay logic lives here. The module is renderer-agnostic and
//! single-threaded: the host calls `tick` once per frame with the current
//! input state and wall clock, then draws from the public state fields.

pub mod ai;
pub mod collision;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{ball_hits_left_paddle, ball_hits_right_paddle, ball_pickup_overlap};
pub use particles::spawn_burst;
pub use powerup::{PendingReversal, PickupKind, ReversalKind};
pub use state::{
    Ball, BallSkin, Difficulty, GameMode, GamePhase, GameState, Paddle, Particle, Pickup,
    StartConfig, StartError,
};
pub use tick::{TickInput, tick};
