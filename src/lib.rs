//! Neon Runner - an endless-runner ball game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, physics, session state)
//! - `scene`: Scene-graph and HUD collaborator traits the host implements
//! - `tuning`: Data-driven game balance

pub mod scene;
pub mod sim;
pub mod tuning;

pub use scene::{EntityId, Hud, NullHud, NullScene, Scene, SceneKind, TrackingScene};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Ball radius (the ball's AABB is a cube of this half-extent)
    pub const BALL_RADIUS: f32 = 0.5;
    /// Platform half-extents (full size 4 x 0.5 x 2)
    pub const PLATFORM_HALF_EXTENTS: [f32; 3] = [2.0, 0.25, 1.0];
    /// Obstacle half-extents (full size 1 x 1 x 0.2)
    pub const OBSTACLE_HALF_EXTENTS: [f32; 3] = [0.5, 0.5, 0.1];
    /// Collectible half-extents (icosahedron of radius 0.3, boxed)
    pub const COLLECTIBLE_HALF_EXTENTS: [f32; 3] = [0.3, 0.3, 0.3];

    /// Height of obstacles and collectibles above their platform center
    pub const PROP_HEIGHT_OFFSET: f32 = 1.0;
    /// Height of the portal above its host platform center
    pub const PORTAL_HEIGHT_OFFSET: f32 = 1.5;
    /// Height of the glow light above its platform center
    pub const LIGHT_HEIGHT_OFFSET: f32 = 1.0;

    /// Cosmetic spin applied to obstacles and collectibles per tick
    pub const PROP_SPIN_PER_TICK: f32 = 0.05;

    /// Number of trail positions kept for rendering
    pub const TRAIL_LENGTH: usize = 20;
}

/// Project a direction onto the horizontal (xz) plane and renormalize.
///
/// Returns `Vec3::NEG_Z` when the input has no horizontal component, so a
/// camera looking straight down still yields a usable forward direction.
#[inline]
pub fn horizontal(dir: Vec3) -> Vec3 {
    let flat = Vec3::new(dir.x, 0.0, dir.z);
    if flat.length_squared() < 1e-12 {
        Vec3::NEG_Z
    } else {
        flat.normalize()
    }
}

/// Right vector for a horizontal forward direction (cross with world up)
#[inline]
pub fn horizontal_right(forward: Vec3) -> Vec3 {
    forward.cross(Vec3::Y)
}
