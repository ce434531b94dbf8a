//! Game state and core simulation types
//!
//! Everything a renderer needs is public on `GameState`; the state machine
//! operations (`start`, `toggle_pause`, `restart`, `end`, `exit`) live here,
//! while per-tick advancement is in `tick`.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-start, welcome screen showing
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Gameplay suspended, resumable
    Paused,
    /// Match over, outcome message available
    Ended,
}

/// Game mode selected at start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// One human vs. the AI paddle
    #[default]
    Single,
    /// Two humans on one keyboard
    LocalTwoPlayer,
    /// Two humans, tournament scoring
    TournamentTwoPlayer,
    /// One human vs. AI; ends when the human concedes, scored in time
    Survival,
    /// Two humans; ends when the left side concedes
    SurvivalTwoPlayer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Single => "single",
            GameMode::LocalTwoPlayer => "local2p",
            GameMode::TournamentTwoPlayer => "tournament-2p",
            GameMode::Survival => "survival",
            GameMode::SurvivalTwoPlayer => "survival-2p",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(GameMode::Single),
            "local2p" => Some(GameMode::LocalTwoPlayer),
            "tournament-2p" => Some(GameMode::TournamentTwoPlayer),
            "survival" => Some(GameMode::Survival),
            "survival-2p" => Some(GameMode::SurvivalTwoPlayer),
            _ => None,
        }
    }

    /// Both paddles human-controlled; the AI controller is inactive
    pub fn is_two_player(&self) -> bool {
        matches!(
            self,
            GameMode::LocalTwoPlayer | GameMode::TournamentTwoPlayer | GameMode::SurvivalTwoPlayer
        )
    }

    /// No score-based win condition; the match ends when the left side concedes
    pub fn is_survival(&self) -> bool {
        matches!(self, GameMode::Survival | GameMode::SurvivalTwoPlayer)
    }
}

/// Opponent difficulty, controls the AI paddle step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// AI paddle step in pixels per tick
    pub fn ai_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 7.0,
        }
    }
}

/// Cosmetic ball skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallSkin {
    #[default]
    Classic,
    Neon,
    Fire,
    Ice,
}

impl BallSkin {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallSkin::Classic => "classic",
            BallSkin::Neon => "neon",
            BallSkin::Fire => "fire",
            BallSkin::Ice => "ice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "classic" => Some(BallSkin::Classic),
            "neon" => Some(BallSkin::Neon),
            "fire" => Some(BallSkin::Fire),
            "ice" => Some(BallSkin::Ice),
            _ => None,
        }
    }

    /// Ball and trail color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            BallSkin::Classic => 0xffffff,
            BallSkin::Neon => 0x00ffff,
            BallSkin::Fire => 0xff4400,
            BallSkin::Ice => 0xaaffff,
        }
    }
}

/// A paddle, fixed horizontally to its side of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Keyboard movement step in pixels per tick
    pub speed: f32,
}

impl Paddle {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            y: (BOARD_HEIGHT - PADDLE_HEIGHT) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Re-center vertically (match start/restart)
    pub fn center(&mut self) {
        self.y = (BOARD_HEIGHT - self.height) / 2.0;
    }

    /// Keep the paddle fully on the board
    pub fn clamp_to_board(&mut self) {
        self.y = self.y.clamp(0.0, BOARD_HEIGHT - self.height);
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
    pub skin: BallSkin,
    /// Recent positions for trail rendering, most-recent-last
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Ball {
    /// A ball at board center with the default serve velocity
    pub fn new(skin: BallSkin) -> Self {
        Self {
            pos: Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0),
            vel: Vec2::new(BALL_START_SPEED, BALL_START_SPEED),
            radius: BALL_RADIUS,
            skin,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record current position to the trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// A power-up pickup waiting on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    /// Top-left corner of the pickup rectangle
    pub pos: Vec2,
    pub kind: super::powerup::PickupKind,
    pub width: f32,
    pub height: f32,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: super::powerup::PickupKind) -> Self {
        Self {
            pos,
            kind,
            width: PICKUP_SIZE,
            height: PICKUP_SIZE,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A visual-effect particle, no gameplay effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Remaining lifetime in ticks
    pub life: f32,
    /// Initial lifetime, for fade-alpha (life / max_life)
    pub max_life: f32,
    pub size: f32,
}

/// Configuration consumed by `GameState::start`
#[derive(Debug, Clone, Default)]
pub struct StartConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub skin: BallSkin,
    pub player_name: String,
    /// Required in two-player modes, ignored otherwise
    pub player2_name: Option<String>,
}

/// Start-transition validation failure; no session state was mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    MissingPlayerName,
    MissingPlayer2Name,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::MissingPlayerName => write!(f, "player 1 name must not be empty"),
            StartError::MissingPlayer2Name => write!(f, "player 2 name must not be empty"),
        }
    }
}

impl std::error::Error for StartError {}

fn session_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state for one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "session_rng")]
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub ball_skin: BallSkin,
    pub player_name: String,
    pub player2_name: String,
    /// Left (human) side score
    pub player_score: u32,
    /// Right side score (AI or player 2)
    pub opponent_score: u32,
    /// Ticks elapsed in survival modes
    pub survival_ticks: u64,
    /// Total simulation ticks while running
    pub time_ticks: u64,
    /// Left paddle, always human
    pub player: Paddle,
    /// Right paddle, AI or player 2 depending on mode
    pub opponent: Paddle,
    pub balls: Vec<Ball>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not part of snapshots/saves)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Scheduled power-up reversals, fire-and-forget per activation
    pub pending_reversals: Vec<super::powerup::PendingReversal>,
    /// Renderer hint, decays each tick; raised on paddle hits
    pub screen_shake: f32,
    /// Set by `end()`: win/lose text or survival duration
    pub outcome: Option<String>,
}

impl GameState {
    /// Create an idle session with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            ball_skin: BallSkin::default(),
            player_name: String::new(),
            player2_name: "Player 2".to_owned(),
            player_score: 0,
            opponent_score: 0,
            survival_ticks: 0,
            time_ticks: 0,
            player: Paddle::new(PLAYER_X),
            opponent: Paddle::new(BOARD_WIDTH - 2.0 * PADDLE_WIDTH),
            balls: vec![Ball::new(BallSkin::default())],
            pickups: Vec::new(),
            particles: Vec::new(),
            pending_reversals: Vec::new(),
            screen_shake: 0.0,
            outcome: None,
        }
    }

    /// Begin a match. Validates names before touching any state; on success
    /// resets scores and the survival timer, rebuilds the ball set, centers
    /// paddles and transitions to Running.
    pub fn start(&mut self, config: StartConfig) -> Result<(), StartError> {
        let name = config.player_name.trim();
        if name.is_empty() {
            return Err(StartError::MissingPlayerName);
        }
        let name2 = if config.mode.is_two_player() {
            let n = config.player2_name.as_deref().unwrap_or("").trim();
            if n.is_empty() {
                return Err(StartError::MissingPlayer2Name);
            }
            n.to_owned()
        } else {
            "Player 2".to_owned()
        };

        self.mode = config.mode;
        self.difficulty = config.difficulty;
        self.ball_skin = config.skin;
        self.player_name = name.to_owned();
        self.player2_name = name2;
        self.player_score = 0;
        self.opponent_score = 0;
        self.survival_ticks = 0;
        self.outcome = None;
        self.screen_shake = 0.0;
        self.pending_reversals.clear();
        self.player.height = PADDLE_HEIGHT;
        self.balls.clear();
        self.balls.push(Ball::new(self.ball_skin));
        self.pickups.clear();
        self.particles.clear();
        self.center_paddles();
        self.phase = GamePhase::Running;
        log::info!(
            "match started: mode={} difficulty={} skin={}",
            self.mode.as_str(),
            self.difficulty.as_str(),
            self.ball_skin.as_str()
        );
        Ok(())
    }

    /// Flip Running/Paused; no effect in Idle or Ended
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Running,
            _ => {}
        }
    }

    /// Re-enter Running from Ended with fresh scores and centered paddles.
    /// The survival timer is intentionally NOT reset here, matching the
    /// original restart behavior (only `start` resets it).
    pub fn restart(&mut self) {
        if self.phase != GamePhase::Ended {
            return;
        }
        self.player_score = 0;
        self.opponent_score = 0;
        self.outcome = None;
        self.screen_shake = 0.0;
        self.pending_reversals.clear();
        self.player.height = PADDLE_HEIGHT;
        self.balls.clear();
        self.balls.push(Ball::new(self.ball_skin));
        self.pickups.clear();
        self.particles.clear();
        self.center_paddles();
        self.phase = GamePhase::Running;
        log::info!("match restarted: mode={}", self.mode.as_str());
    }

    /// Terminate the match: freeze scores, format the outcome message and
    /// cancel pending power-up reversals so they cannot mutate a dead match.
    pub fn end(&mut self) {
        self.phase = GamePhase::Ended;
        self.pending_reversals.clear();

        let name = if self.player_name.is_empty() {
            "Player"
        } else {
            self.player_name.as_str()
        };
        let message = if self.mode.is_survival() {
            format!("{} survived {} seconds!", name, self.survival_seconds())
        } else if self.player_score > self.opponent_score {
            format!("{} Wins!", name)
        } else {
            format!("{} Wins!", self.opponent_display_name())
        };
        log::info!(
            "match over: {} ({}-{})",
            message,
            self.player_score,
            self.opponent_score
        );
        self.outcome = Some(message);
    }

    /// Leave the game-over screen back to Idle ("play again"/"exit")
    pub fn exit(&mut self) {
        if self.phase == GamePhase::Ended {
            self.phase = GamePhase::Idle;
        }
    }

    /// Re-center both paddles vertically
    pub fn center_paddles(&mut self) {
        self.player.center();
        self.opponent.center();
    }

    /// Reposition a scored-against ball: board center, horizontal direction
    /// reversed, vertical velocity redrawn, trail cleared.
    pub fn reset_ball(&mut self, idx: usize) {
        use rand::Rng;
        let dy = self.rng.random_range(-RESERVE_SPREAD..=RESERVE_SPREAD);
        let ball = &mut self.balls[idx];
        ball.pos = Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0);
        ball.vel.x = -ball.vel.x;
        ball.vel.y = dy;
        ball.clear_trail();
    }

    /// Score-based end condition: reach WIN_SCORE with a WIN_MARGIN lead
    pub fn win_reached(&self) -> bool {
        (self.player_score >= WIN_SCORE || self.opponent_score >= WIN_SCORE)
            && self.player_score.abs_diff(self.opponent_score) >= WIN_MARGIN
    }

    /// Whole seconds survived, at the nominal tick rate
    pub fn survival_seconds(&self) -> u64 {
        self.survival_ticks / TICKS_PER_SECOND
    }

    /// Display name for the right side
    pub fn opponent_display_name(&self) -> &str {
        if self.mode.is_two_player() {
            &self.player2_name
        } else {
            "AI"
        }
    }
}
