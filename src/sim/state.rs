//! Game state and session transitions
//!
//! `GameState` is the explicit simulation context: everything the tick
//! mutates lives here, created at session start and owned by the host loop.
//! Session transitions (life loss, run completion, restart) are methods so
//! the tick stays a thin orchestrator.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::track::Track;
use crate::consts::*;
use crate::scene::{EntityId, Hud, IdAlloc, Scene};
use crate::tuning::Tuning;

/// Events one tick can emit, consumed by the session state machine and
/// observable by the host (sound cues, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A collectible was picked up and removed
    Collected { id: EntityId, score: u64 },
    /// Ball touched an obstacle
    ObstacleHit,
    /// Ball reached the portal; the track was regenerated
    PortalReached,
    /// Ball fell below the track
    FellOff,
}

/// The player's ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Ground contact resolved on the most recent tick. Gates jumping:
    /// comparing `velocity.y == 0.0` instead would misfire at the jump apex,
    /// where accumulated rounding can bring it arbitrarily close to zero.
    pub grounded: bool,
    /// Position history for the trail effect, newest first (rendering only)
    pub trail: Vec<Vec3>,
}

impl Ball {
    /// Ball at rest on a surface
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: true,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record current position to the trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.position);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving all generation
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub lives: u8,
    pub score: u64,
    /// Completed runs (portal reaches) this session
    pub run_counter: u32,
    /// Terminal flag; the tick is a no-op (except restart) while set
    pub game_over: bool,
    pub ball: Ball,
    /// The current track segment; replaced wholesale on regeneration
    pub track: Track,
    ids: IdAlloc,
}

impl GameState {
    /// Create a session: generate the first track and rest the ball on it
    pub fn new(seed: u64, tuning: &Tuning, scene: &mut dyn Scene) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAlloc::default();
        let color = random_track_color(&mut rng);
        let track = Track::generate(&mut rng, tuning, color, &mut ids, scene);
        let ball = Ball::at(track.spawn_point());

        log::info!("session start: seed={seed}, lives={}", tuning.starting_lives);

        Self {
            seed,
            rng,
            time_ticks: 0,
            lives: tuning.starting_lives,
            score: 0,
            run_counter: 0,
            game_over: false,
            ball,
            track,
            ids,
        }
    }

    /// Portal reached: count the run and atomically replace the track.
    /// The old segment is fully retired before the new one is registered.
    pub fn complete_run(&mut self, tuning: &Tuning, scene: &mut dyn Scene) {
        self.run_counter += 1;
        self.track.retire(scene);
        let color = random_track_color(&mut self.rng);
        self.track = Track::generate(&mut self.rng, tuning, color, &mut self.ids, scene);
        self.respawn_ball();
        log::info!("run {} complete, new track color #{color:06x}", self.run_counter);
    }

    /// Obstacle hit or fall: lose a life, then either respawn on the current
    /// track or end the session. On the terminal transition the counters are
    /// reset for the next session while the flag keeps the sim halted.
    pub fn lose_life(&mut self, tuning: &Tuning) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            log::info!("game over: runs={}, score={}", self.run_counter, self.score);
            self.game_over = true;
            self.run_counter = 0;
            self.lives = tuning.starting_lives;
            self.score = 0;
        } else {
            log::debug!("life lost, {} remaining", self.lives);
            self.respawn_ball();
        }
    }

    /// Explicit restart from the terminal state
    pub fn restart(&mut self) {
        if self.game_over {
            self.game_over = false;
            self.respawn_ball();
            log::info!("session restarted");
        }
    }

    /// Put the ball back on the current track's first platform, at rest
    pub fn respawn_ball(&mut self) {
        self.ball.position = self.track.spawn_point();
        self.ball.velocity = Vec3::ZERO;
        self.ball.grounded = true;
        self.ball.clear_trail();
    }

    /// Push every HUD-visible value to the HUD collaborator
    pub fn sync_hud(&self, hud: &mut dyn Hud) {
        hud.set_runs(self.run_counter);
        hud.set_lives(self.lives);
        hud.set_score(self.score);
        hud.set_game_over(self.game_over);
    }
}

/// Random neon color for a track segment (0xRRGGBB)
fn random_track_color(rng: &mut impl Rng) -> u32 {
    rng.random_range(0..=0xFF_FF_FF)
}
