//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, fixed per-tick constants
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Scene`/`Hud` traits

pub mod collision;
pub mod spline;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::Aabb;
pub use spline::CatmullRom3;
pub use state::{Ball, GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use track::{
    Collectible, Obstacle, Platform, PlatformMotion, PointLight, Portal, Track, TrackSample,
    generate_control_points, sample_anchors,
};
