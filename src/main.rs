//! Neon Runner headless demo
//!
//! Drives the simulation without a renderer: a scripted pilot holds forward
//! and hops occasionally, and the console stands in for the HUD. Useful for
//! smoke-testing generation and physics from the terminal.
//!
//! Usage: neon-runner [seed] [ticks]

use neon_runner::sim::{GameEvent, GameState, TickInput, tick};
use neon_runner::{Hud, TrackingScene, Tuning};

/// HUD collaborator that logs counter changes
#[derive(Default)]
struct LogHud;

impl Hud for LogHud {
    fn set_runs(&mut self, runs: u32) {
        log::info!("HUD runs: {runs}");
    }
    fn set_lives(&mut self, lives: u8) {
        log::info!("HUD lives: {lives}");
    }
    fn set_score(&mut self, score: u64) {
        log::info!("HUD score: {score}");
    }
    fn set_game_over(&mut self, game_over: bool) {
        if game_over {
            log::info!("HUD game over - press R to restart");
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10_000);

    let tuning = Tuning::default();
    let mut scene = TrackingScene::new();
    let mut hud = LogHud;
    let mut state = GameState::new(seed, &tuning, &mut scene);
    state.sync_hud(&mut hud);

    log::info!(
        "demo run: seed={seed}, {} scene entities, first spawn at {}",
        scene.len(),
        state.ball.position
    );

    let mut events = Vec::new();
    for t in 0..ticks {
        let input = TickInput {
            forward: true,
            // Hop every couple of seconds; the sim ignores it while airborne
            jump: t % 120 == 0,
            restart: state.game_over,
            ..TickInput::default()
        };

        tick(&mut state, &input, &tuning, &mut scene, &mut hud, &mut events);

        for event in &events {
            match event {
                GameEvent::Collected { id, score } => {
                    log::debug!("collected {id:?} (+{score})")
                }
                GameEvent::ObstacleHit => log::debug!("hit an obstacle"),
                GameEvent::PortalReached => log::debug!("portal reached"),
                GameEvent::FellOff => log::debug!("fell off the track"),
            }
        }
    }

    println!(
        "seed {seed}: {} ticks, {} runs completed, score {}, lives {}, {} live scene entities",
        state.time_ticks, state.run_counter, state.score, state.lives,
        scene.len(),
    );
}
