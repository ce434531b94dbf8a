//! Power Pong headless demo
//!
//! Runs a scripted single-player match at the nominal tick rate with a
//! simple ball-tracking script standing in for the human player, then
//! prints a JSON snapshot of the final state. Useful for eyeballing the
//! simulation without a renderer: `RUST_LOG=debug cargo run`.

use power_pong::consts::*;
use power_pong::sim::{GameMode, GamePhase, GameState, StartConfig, TickInput, tick};

const MAX_TICKS: u64 = 60 * TICKS_PER_SECOND;

fn main() {
    env_logger::init();

    let seed = 0xB0A7;
    let mut state = GameState::new(seed);
    if let Err(err) = state.start(StartConfig {
        mode: GameMode::Single,
        player_name: "Demo".to_owned(),
        ..Default::default()
    }) {
        eprintln!("failed to start demo match: {err}");
        std::process::exit(1);
    }

    let mut last_scores = (0, 0);
    for n in 0..MAX_TICKS {
        // The scripted player mirrors the primary ball, slightly lagged
        let target = state.balls[0].pos.y;
        let input = TickInput {
            pointer_y: Some(state.player.center_y() + (target - state.player.center_y()) * 0.2),
            ..Default::default()
        };
        let now_ms = n as f64 * 1000.0 / TICKS_PER_SECOND as f64;
        tick(&mut state, &input, now_ms);

        let scores = (state.player_score, state.opponent_score);
        if scores != last_scores {
            log::info!("score: {} - {}", scores.0, scores.1);
            last_scores = scores;
        }
        if state.phase == GamePhase::Ended {
            break;
        }
    }

    if state.phase == GamePhase::Running {
        state.end();
    }
    if let Some(outcome) = &state.outcome {
        log::info!("{outcome}");
    }

    match serde_json::to_string_pretty(&state) {
        Ok(snapshot) => println!("{snapshot}"),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
}
