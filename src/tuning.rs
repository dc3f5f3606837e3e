//! Data-driven game balance
//!
//! Everything a designer might want to retune lives here; fixed geometry
//! stays in `crate::consts`. Defaults reproduce the shipped feel, and a
//! host can override them from a JSON blob.

use serde::{Deserialize, Serialize};

/// Gameplay balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball physics (per tick) ===
    /// Downward acceleration applied to vertical velocity
    pub gravity: f32,
    /// Horizontal velocity retained each tick before input is added
    pub damping: f32,
    /// Scale applied to the movement-intent vector
    pub move_speed: f32,
    /// Upward velocity set when jumping off a platform
    pub jump_speed: f32,
    /// Ball y below which the run ends in a fall
    pub fall_y: f32,

    // === Track generation ===
    /// Number of spline control points per track segment
    pub control_points: usize,
    /// Curve sample resolution (yields `curve_samples + 1` points)
    pub curve_samples: usize,
    /// Every Nth curve sample hosts a platform
    pub anchor_stride: usize,
    /// Chance a control-point step uses the larger depth gap
    pub gap_chance: f64,
    /// Half-width of the lateral random walk per control point
    pub lateral_step: f32,

    // === Entity spawning ===
    /// Chance an anchor becomes a moving platform
    pub moving_platform_chance: f64,
    /// Chance a static platform hosts an obstacle
    pub obstacle_chance: f64,
    /// Chance any platform hosts a collectible
    pub collectible_chance: f64,
    /// Moving platform oscillation amplitude range
    pub amplitude_min: f32,
    pub amplitude_max: f32,
    /// Moving platform phase advance per tick
    pub angular_speed_min: f32,
    pub angular_speed_max: f32,

    // === Session ===
    /// Lives at session start
    pub starting_lives: u8,
    /// Score awarded per collectible
    pub collectible_score: u64,
    /// Ball-to-portal distance that triggers regeneration
    pub portal_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.01,
            damping: 0.9,
            move_speed: 0.02,
            jump_speed: 0.15,
            fall_y: -10.0,

            control_points: 20,
            curve_samples: 200,
            anchor_stride: 10,
            gap_chance: 0.2,
            lateral_step: 2.5,

            moving_platform_chance: 0.2,
            obstacle_chance: 0.3,
            collectible_chance: 0.3,
            amplitude_min: 2.0,
            amplitude_max: 6.0,
            angular_speed_min: 0.01,
            angular_speed_max: 0.03,

            starting_lives: 3,
            collectible_score: 10,
            portal_radius: 1.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
