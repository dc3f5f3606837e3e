//! Track generation and entity spawning
//!
//! One track segment is a chain of platforms laid along a Catmull-Rom curve
//! fitted through a random depth-walk, ending at a portal. The whole segment
//! is owned by a `Track`: regenerating retires every entity it registered
//! with the scene before the replacement is built, so collision checks never
//! see a half-replaced track.

use glam::Vec3;
use rand::Rng;

use super::collision::Aabb;
use super::spline::CatmullRom3;
use crate::consts::*;
use crate::scene::{EntityId, IdAlloc, Scene, SceneKind};
use crate::tuning::Tuning;

/// A curve sample chosen to host a platform
#[derive(Debug, Clone, Copy)]
pub struct TrackSample {
    pub position: Vec3,
    /// Heading along the track at this sample (rotation around y)
    pub yaw: f32,
}

/// How a platform moves, if at all
#[derive(Debug, Clone, Copy)]
pub enum PlatformMotion {
    Static,
    /// Sinusoidal oscillation on world x around the spawn position
    Oscillating {
        origin: Vec3,
        amplitude: f32,
        angular_speed: f32,
        phase: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub id: EntityId,
    pub position: Vec3,
    pub yaw: f32,
    pub motion: PlatformMotion,
}

impl Platform {
    /// Advance oscillation by one tick. Static platforms are unchanged.
    pub fn advance(&mut self) {
        if let PlatformMotion::Oscillating {
            origin,
            amplitude,
            angular_speed,
            ref mut phase,
        } = self.motion
        {
            *phase += angular_speed;
            self.position.x = origin.x + phase.sin() * amplitude;
        }
    }

    /// World AABB of the yaw-rotated platform box
    pub fn world_aabb(&self) -> Aabb {
        Aabb::from_rotated_box(self.position, Vec3::from(PLATFORM_HALF_EXTENTS), self.yaw)
    }

    /// Where a ball rests on this platform
    pub fn rest_point(&self) -> Vec3 {
        self.position + Vec3::new(0.0, PLATFORM_HALF_EXTENTS[1] + BALL_RADIUS, 0.0)
    }
}

/// Obstacle on a static platform; contact costs a life
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: EntityId,
    pub position: Vec3,
    /// Cosmetic spin; collision ignores it
    pub rotation_y: f32,
}

impl Obstacle {
    pub fn world_aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, Vec3::from(OBSTACLE_HALF_EXTENTS))
    }
}

/// Collectible; contact scores and removes it
#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: EntityId,
    pub position: Vec3,
    pub rotation_y: f32,
}

impl Collectible {
    pub fn world_aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, Vec3::from(COLLECTIBLE_HALF_EXTENTS))
    }
}

/// Glow light bound to one platform
#[derive(Debug, Clone)]
pub struct PointLight {
    pub id: EntityId,
    pub position: Vec3,
}

/// Exit portal; proximity triggers regeneration
#[derive(Debug, Clone)]
pub struct Portal {
    pub id: EntityId,
    pub position: Vec3,
}

/// One generated track segment and every scene entity it owns
#[derive(Debug, Clone)]
pub struct Track {
    /// Neon color shared by platforms and their lights (0xRRGGBB)
    pub color: u32,
    pub platforms: Vec<Platform>,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub lights: Vec<PointLight>,
    pub portal: Portal,
}

/// Random-walk the spline control points: bounded lateral drift, strictly
/// deepening z, with an occasional larger gap to force a jump.
pub fn generate_control_points(rng: &mut impl Rng, tuning: &Tuning) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(tuning.control_points);
    let mut x = 0.0_f32;
    let mut z = 0.0_f32;

    for _ in 0..tuning.control_points {
        x += rng.random_range(-tuning.lateral_step..tuning.lateral_step);
        if rng.random_bool(tuning.gap_chance) {
            z -= rng.random_range(5.0..10.0);
        } else {
            z -= rng.random_range(2.0..7.0);
        }
        points.push(Vec3::new(x, 0.0, z));
    }

    points
}

/// Pick every `stride`th curve sample as a platform anchor, oriented along
/// the local tangent (finite difference against the next sample; the final
/// anchor reuses the incoming direction).
pub fn sample_anchors(samples: &[Vec3], stride: usize) -> Vec<TrackSample> {
    assert!(stride >= 1, "anchor stride must be at least 1");

    let mut anchors = Vec::with_capacity(samples.len() / stride + 1);
    for i in (0..samples.len()).step_by(stride) {
        let position = samples[i];
        let dir = if i + 1 < samples.len() {
            samples[i + 1] - position
        } else {
            position - samples[i - 1]
        };
        anchors.push(TrackSample {
            position,
            yaw: dir.x.atan2(dir.z),
        });
    }
    anchors
}

impl Track {
    /// Generate a fresh track segment and register every entity with the
    /// scene. The caller must have retired the previous track first.
    pub fn generate(
        rng: &mut impl Rng,
        tuning: &Tuning,
        color: u32,
        ids: &mut IdAlloc,
        scene: &mut dyn Scene,
    ) -> Self {
        let control_points = generate_control_points(rng, tuning);
        let curve = CatmullRom3::new(control_points);
        let samples = curve.sample(tuning.curve_samples);
        let anchors = sample_anchors(&samples, tuning.anchor_stride);
        assert!(
            anchors.len() >= 2,
            "track needs a spawn platform and a portal host, got {} anchors",
            anchors.len()
        );

        let mut platforms = Vec::with_capacity(anchors.len());
        let mut obstacles = Vec::new();
        let mut collectibles = Vec::new();
        let mut lights = Vec::with_capacity(anchors.len());
        let prop_offset = Vec3::new(0.0, PROP_HEIGHT_OFFSET, 0.0);

        for anchor in &anchors {
            let moving = rng.random_bool(tuning.moving_platform_chance);
            let motion = if moving {
                PlatformMotion::Oscillating {
                    origin: anchor.position,
                    amplitude: rng.random_range(tuning.amplitude_min..tuning.amplitude_max),
                    angular_speed: rng
                        .random_range(tuning.angular_speed_min..tuning.angular_speed_max),
                    phase: rng.random_range(0.0..std::f32::consts::TAU),
                }
            } else {
                PlatformMotion::Static
            };

            let platform = Platform {
                id: ids.next(),
                position: anchor.position,
                yaw: anchor.yaw,
                motion,
            };
            scene.add(platform.id, SceneKind::Platform, platform.position);

            let light = PointLight {
                id: ids.next(),
                position: anchor.position + Vec3::new(0.0, LIGHT_HEIGHT_OFFSET, 0.0),
            };
            scene.add(light.id, SceneKind::Light, light.position);
            lights.push(light);

            // Obstacles only make sense on ground that stays put
            if !moving && rng.random_bool(tuning.obstacle_chance) {
                let obstacle = Obstacle {
                    id: ids.next(),
                    position: anchor.position + prop_offset,
                    rotation_y: 0.0,
                };
                scene.add(obstacle.id, SceneKind::Obstacle, obstacle.position);
                obstacles.push(obstacle);
            }

            if rng.random_bool(tuning.collectible_chance) {
                let collectible = Collectible {
                    id: ids.next(),
                    position: anchor.position + prop_offset,
                    rotation_y: 0.0,
                };
                scene.add(collectible.id, SceneKind::Collectible, collectible.position);
                collectibles.push(collectible);
            }

            platforms.push(platform);
        }

        let last = platforms
            .last()
            .expect("at least two anchors were asserted above");
        let portal = Portal {
            id: ids.next(),
            position: last.position + Vec3::new(0.0, PORTAL_HEIGHT_OFFSET, 0.0),
        };
        scene.add(portal.id, SceneKind::Portal, portal.position);

        log::debug!(
            "generated track: {} platforms ({} moving), {} obstacles, {} collectibles, color #{color:06x}",
            platforms.len(),
            platforms
                .iter()
                .filter(|p| matches!(p.motion, PlatformMotion::Oscillating { .. }))
                .count(),
            obstacles.len(),
            collectibles.len(),
        );

        Self {
            color,
            platforms,
            obstacles,
            collectibles,
            lights,
            portal,
        }
    }

    /// Remove every entity this track registered with the scene
    pub fn retire(&self, scene: &mut dyn Scene) {
        for platform in &self.platforms {
            scene.remove(platform.id);
        }
        for light in &self.lights {
            scene.remove(light.id);
        }
        for obstacle in &self.obstacles {
            scene.remove(obstacle.id);
        }
        for collectible in &self.collectibles {
            scene.remove(collectible.id);
        }
        scene.remove(self.portal.id);
    }

    /// Ball spawn point: resting on the first platform
    pub fn spawn_point(&self) -> Vec3 {
        self.platforms[0].rest_point()
    }
}
