//! Scene-graph and HUD collaborator traits
//!
//! The simulation owns gameplay state; the host owns rendering. These traits
//! are the seam: the sim tells the host when track entities come and go and
//! when HUD counters change, and the host reads live positions straight from
//! `GameState` each frame.

use std::collections::HashSet;

use glam::Vec3;

/// Opaque handle tying a sim entity to its scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Allocates monotonically increasing entity ids for one session
#[derive(Debug, Clone, Default)]
pub struct IdAlloc {
    next: u32,
}

impl IdAlloc {
    pub fn next(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// What kind of object an entity id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Platform,
    Obstacle,
    Collectible,
    Portal,
    /// Glow light bound 1:1 to a platform's lifecycle
    Light,
}

/// Scene-graph collaborator: object lifecycle only.
///
/// Per-frame positions are not pushed through this trait; hosts read them
/// from the simulation state when rendering.
pub trait Scene {
    fn add(&mut self, id: EntityId, kind: SceneKind, position: Vec3);
    fn remove(&mut self, id: EntityId);
}

/// HUD collaborator, invoked after every mutation of the values it shows
pub trait Hud {
    fn set_runs(&mut self, runs: u32);
    fn set_lives(&mut self, lives: u8);
    fn set_score(&mut self, score: u64);
    /// Terminal banner toggled with the game-over flag
    fn set_game_over(&mut self, game_over: bool);
}

/// Scene that discards everything (headless hosts, benchmarks)
#[derive(Debug, Default)]
pub struct NullScene;

impl Scene for NullScene {
    fn add(&mut self, _id: EntityId, _kind: SceneKind, _position: Vec3) {}
    fn remove(&mut self, _id: EntityId) {}
}

/// HUD that discards everything
#[derive(Debug, Default)]
pub struct NullHud;

impl Hud for NullHud {
    fn set_runs(&mut self, _runs: u32) {}
    fn set_lives(&mut self, _lives: u8) {}
    fn set_score(&mut self, _score: u64) {}
    fn set_game_over(&mut self, _game_over: bool) {}
}

/// Scene that tracks the set of live entity ids.
///
/// Hosts can wrap their own scene with this to diff insertions/removals;
/// the regeneration tests use it to prove no prior-track entity survives.
#[derive(Debug, Default)]
pub struct TrackingScene {
    live: HashSet<EntityId>,
}

impl TrackingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    pub fn live_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.live.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl Scene for TrackingScene {
    fn add(&mut self, id: EntityId, _kind: SceneKind, _position: Vec3) {
        self.live.insert(id);
    }

    fn remove(&mut self, id: EntityId) {
        self.live.remove(&id);
    }
}
