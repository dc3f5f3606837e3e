//! Per-frame simulation tick
//!
//! The host calls `tick` once per animation frame with an input snapshot
//! captured at tick start. Step order matters and is fixed:
//! platform/prop motion, input, gravity, integration, then collision
//! resolution in platform -> obstacle -> collectible -> portal -> fall order.

use glam::{Vec2, Vec3};

use super::collision::{Aabb, resolve_ground_contact};
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::scene::{Hud, Scene};
use crate::tuning::Tuning;
use crate::{horizontal, horizontal_right};

/// Input snapshot for a single tick.
///
/// The host accumulates key/touch events between frames and freezes them
/// into one of these at tick start; the sim never sees the raw callbacks.
#[derive(Debug, Clone)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Restart request (only honored in the terminal state)
    pub restart: bool,
    /// Joystick direction scaled by force (|v| <= 1). Overrides the
    /// directional keys when present.
    pub joystick: Option<Vec2>,
    /// Camera forward vector; movement is camera-relative on the ground plane
    pub camera_forward: Vec3,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump: false,
            restart: false,
            joystick: None,
            camera_forward: Vec3::NEG_Z,
        }
    }
}

impl TickInput {
    /// Movement intent on the ground plane, camera-relative, unscaled
    fn intent(&self) -> Vec3 {
        let fwd = horizontal(self.camera_forward);
        let right = horizontal_right(fwd);

        if let Some(stick) = self.joystick {
            // stick.y pushes along camera forward, stick.x strafes
            return fwd * stick.y + right * stick.x;
        }

        let mut intent = Vec3::ZERO;
        if self.forward {
            intent += fwd;
        }
        if self.backward {
            intent -= fwd;
        }
        if self.left {
            intent -= right;
        }
        if self.right {
            intent += right;
        }
        intent
    }
}

/// Advance the simulation by one frame.
///
/// Events from this tick are pushed into `events` (cleared first). While the
/// terminal flag is set the only effect is honoring a restart request.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    tuning: &Tuning,
    scene: &mut dyn Scene,
    hud: &mut dyn Hud,
    events: &mut Vec<GameEvent>,
) {
    events.clear();

    if state.game_over {
        if input.restart {
            state.restart();
            state.sync_hud(hud);
        }
        return;
    }

    state.time_ticks += 1;

    // 1. Entity motion: oscillating platforms and cosmetic prop spin
    for platform in &mut state.track.platforms {
        platform.advance();
    }
    for obstacle in &mut state.track.obstacles {
        obstacle.rotation_y += PROP_SPIN_PER_TICK;
    }
    for collectible in &mut state.track.collectibles {
        collectible.rotation_y += PROP_SPIN_PER_TICK;
    }

    // 2-3. Damp horizontal velocity, then add camera-relative intent
    let ball = &mut state.ball;
    ball.velocity.x *= tuning.damping;
    ball.velocity.z *= tuning.damping;
    ball.velocity += input.intent() * tuning.move_speed;

    // Jump only from the ground; no mid-air double jumps
    if input.jump && ball.grounded {
        ball.velocity.y = tuning.jump_speed;
        ball.grounded = false;
    }

    // 4-5. Gravity, then integrate
    ball.velocity.y -= tuning.gravity;
    ball.position += ball.velocity;

    // 6. Ground contact: first overlapping platform wins, no stacking
    ball.grounded = false;
    for platform in &state.track.platforms {
        if let Some(contact) = resolve_ground_contact(
            ball.position,
            BALL_RADIUS,
            ball.velocity.y,
            &platform.world_aabb(),
        ) {
            ball.position.y = contact.snap_y;
            ball.velocity.y = 0.0;
            ball.grounded = true;
            break;
        }
    }

    let ball_box = Aabb::from_sphere(state.ball.position, BALL_RADIUS);

    // 7. Obstacles cost a life; the respawn (or terminal) ends this tick
    for obstacle in &state.track.obstacles {
        if ball_box.intersects(&obstacle.world_aabb()) {
            events.push(GameEvent::ObstacleHit);
            state.lose_life(tuning);
            state.sync_hud(hud);
            return;
        }
    }

    // 8. Collectibles: removed permanently on first contact
    let score_each = tuning.collectible_score;
    let mut collected = Vec::new();
    state.track.collectibles.retain(|collectible| {
        if ball_box.intersects(&collectible.world_aabb()) {
            collected.push(collectible.id);
            false
        } else {
            true
        }
    });
    if !collected.is_empty() {
        for id in collected {
            state.score += score_each;
            scene.remove(id);
            events.push(GameEvent::Collected {
                id,
                score: score_each,
            });
        }
        state.sync_hud(hud);
    }

    // 9. Portal proximity regenerates the whole track
    if state.ball.position.distance(state.track.portal.position) < tuning.portal_radius {
        events.push(GameEvent::PortalReached);
        state.complete_run(tuning, scene);
        state.sync_hud(hud);
        return;
    }

    // 10. Fell below the track
    if state.ball.position.y < tuning.fall_y {
        events.push(GameEvent::FellOff);
        state.lose_life(tuning);
        state.sync_hud(hud);
        return;
    }

    state.ball.record_trail();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityId, IdAlloc, NullHud, NullScene};
    use crate::sim::track::{
        Collectible, Obstacle, Platform, PlatformMotion, Portal, Track,
    };

    /// Session whose track is a single static platform with top surface at
    /// y=1.0, portal far away. Ball rests at y=1.5.
    fn flat_session() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning, &mut NullScene);
        let mut ids = IdAlloc::default();
        state.track = Track {
            color: 0x00ffff,
            platforms: vec![Platform {
                id: ids.next(),
                position: Vec3::new(0.0, 0.75, 0.0),
                yaw: 0.0,
                motion: PlatformMotion::Static,
            }],
            obstacles: vec![],
            collectibles: vec![],
            lights: vec![],
            portal: Portal {
                id: ids.next(),
                position: Vec3::new(0.0, 0.0, -1000.0),
            },
        };
        state.respawn_ball();
        (state, tuning)
    }

    fn run_tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
        let mut events = Vec::new();
        tick(state, input, tuning, &mut NullScene, &mut NullHud, &mut events);
        events
    }

    #[test]
    fn test_resting_ball_stays_snapped() {
        let (mut state, tuning) = flat_session();
        assert_eq!(state.ball.position.y, 1.5);
        for _ in 0..100 {
            run_tick(&mut state, &TickInput::default(), &tuning);
        }
        assert_eq!(state.ball.position.y, 1.5);
        assert_eq!(state.ball.velocity.y, 0.0);
    }

    #[test]
    fn test_descending_ball_snaps_exactly() {
        let (mut state, tuning) = flat_session();
        state.ball.position = Vec3::new(0.0, 1.6, 0.0);
        state.ball.velocity = Vec3::new(0.0, -0.2, 0.0);
        run_tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.ball.position.y, 1.5);
        assert_eq!(state.ball.velocity.y, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut state, tuning) = flat_session();
        let jump = TickInput {
            jump: true,
            ..TickInput::default()
        };

        run_tick(&mut state, &jump, &tuning);
        let vy_after_jump = state.ball.velocity.y;
        assert!((vy_after_jump - (tuning.jump_speed - tuning.gravity)).abs() < 1e-6);

        // Airborne now; a second jump request must not re-trigger
        run_tick(&mut state, &jump, &tuning);
        assert!((state.ball.velocity.y - (vy_after_jump - tuning.gravity)).abs() < 1e-6);
    }

    #[test]
    fn test_intent_is_camera_relative() {
        let (mut state, tuning) = flat_session();
        // Camera looking down +x: "forward" must accelerate the ball on +x
        let input = TickInput {
            forward: true,
            camera_forward: Vec3::new(1.0, -0.5, 0.0),
            ..TickInput::default()
        };
        run_tick(&mut state, &input, &tuning);
        assert!(state.ball.velocity.x > 0.0);
        assert!(state.ball.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn test_joystick_overrides_keys() {
        let (mut state, tuning) = flat_session();
        let input = TickInput {
            forward: true, // would push -z
            joystick: Some(Vec2::new(1.0, 0.0)), // strafe right: +x
            ..TickInput::default()
        };
        run_tick(&mut state, &input, &tuning);
        assert!(state.ball.velocity.x > 0.0);
        assert!(state.ball.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_damping() {
        let (mut state, tuning) = flat_session();
        state.ball.velocity.x = 1.0;
        run_tick(&mut state, &TickInput::default(), &tuning);
        assert!((state.ball.velocity.x - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_obstacle_contact_costs_a_life_and_respawns() {
        let (mut state, tuning) = flat_session();
        state.track.obstacles.push(Obstacle {
            id: EntityId(900),
            position: Vec3::new(0.0, 1.5, 0.0),
            rotation_y: 0.0,
        });
        let events = run_tick(&mut state, &TickInput::default(), &tuning);
        assert!(events.contains(&GameEvent::ObstacleHit));
        assert_eq!(state.lives, 2);
        assert_eq!(state.ball.position, state.track.spawn_point());
    }

    #[test]
    fn test_collectible_scores_once() {
        let (mut state, tuning) = flat_session();
        state.track.collectibles.push(Collectible {
            id: EntityId(901),
            position: Vec3::new(0.0, 1.5, 0.0),
            rotation_y: 0.0,
        });

        let events = run_tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.score, 10);
        assert!(matches!(events[0], GameEvent::Collected { .. }));
        assert!(state.track.collectibles.is_empty());

        // Same spot next tick: the collectible is gone, score unchanged
        let events = run_tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.score, 10);
        assert!(events.is_empty());
    }

    #[test]
    fn test_portal_triggers_regeneration() {
        let (mut state, tuning) = flat_session();
        state.track.portal.position = state.ball.position + Vec3::new(0.3, 0.0, 0.0);
        let events = run_tick(&mut state, &TickInput::default(), &tuning);
        assert!(events.contains(&GameEvent::PortalReached));
        assert_eq!(state.run_counter, 1);
        // Fresh track: ball is back at its spawn point
        assert_eq!(state.ball.position, state.track.spawn_point());
    }

    #[test]
    fn test_falling_off_costs_a_life() {
        let (mut state, tuning) = flat_session();
        state.ball.position = Vec3::new(100.0, -9.9, 100.0);
        state.ball.velocity = Vec3::new(0.0, -0.5, 0.0);
        let events = run_tick(&mut state, &TickInput::default(), &tuning);
        assert!(events.contains(&GameEvent::FellOff));
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_terminal_state_only_honors_restart() {
        let (mut state, tuning) = flat_session();
        for _ in 0..3 {
            state.lose_life(&tuning);
        }
        assert!(state.game_over);

        let ticks_before = state.time_ticks;
        run_tick(&mut state, &TickInput::default(), &tuning);
        assert_eq!(state.time_ticks, ticks_before);
        assert!(state.game_over);

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        run_tick(&mut state, &restart, &tuning);
        assert!(!state.game_over);
    }

    #[test]
    fn test_moving_platform_advances_before_collision() {
        let (mut state, tuning) = flat_session();
        state.track.platforms[0].motion = PlatformMotion::Oscillating {
            origin: Vec3::new(0.0, 0.75, 0.0),
            amplitude: 3.0,
            angular_speed: 0.02,
            phase: 0.0,
        };
        run_tick(&mut state, &TickInput::default(), &tuning);
        let expected_x = (0.02_f32).sin() * 3.0;
        assert!((state.track.platforms[0].position.x - expected_x).abs() < 1e-5);
        // Ball still grounded on the (barely moved) platform
        assert_eq!(state.ball.position.y, 1.5);
    }
}
