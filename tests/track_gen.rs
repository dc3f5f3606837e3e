//! Generator properties over arbitrary seeds

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use neon_runner::scene::IdAlloc;
use neon_runner::sim::{CatmullRom3, Track, generate_control_points, sample_anchors};
use neon_runner::{TrackingScene, Tuning};

proptest! {
    /// Every generated track has a spawn anchor and a portal anchor, and
    /// always progresses forward: anchor z strictly decreases.
    #[test]
    fn anchors_progress_forward(seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);

        let points = generate_control_points(&mut rng, &tuning);
        let curve = CatmullRom3::new(points);
        let samples = curve.sample(tuning.curve_samples);
        let anchors = sample_anchors(&samples, tuning.anchor_stride);

        prop_assert!(anchors.len() >= 2);
        for pair in anchors.windows(2) {
            prop_assert!(
                pair[1].position.z < pair[0].position.z,
                "anchor went backwards: {:?} -> {:?}",
                pair[0].position,
                pair[1].position
            );
        }
    }

    /// The scene receives exactly the entities the track owns: one platform
    /// and one light per anchor, the props, and a single portal.
    #[test]
    fn scene_population_matches_track(seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAlloc::default();
        let mut scene = TrackingScene::new();

        let track = Track::generate(&mut rng, &tuning, 0x00ffff, &mut ids, &mut scene);

        prop_assert_eq!(track.lights.len(), track.platforms.len());
        let expected = track.platforms.len() * 2
            + track.obstacles.len()
            + track.collectibles.len()
            + 1;
        prop_assert_eq!(scene.len(), expected);

        track.retire(&mut scene);
        prop_assert!(scene.is_empty());
    }

    /// Moving platforms never spawn with an obstacle on top
    #[test]
    fn obstacles_only_on_static_platforms(seed in any::<u64>()) {
        use neon_runner::sim::PlatformMotion;

        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = IdAlloc::default();
        let track = Track::generate(
            &mut rng,
            &tuning,
            0x00ffff,
            &mut ids,
            &mut neon_runner::NullScene,
        );

        for obstacle in &track.obstacles {
            let host = track
                .platforms
                .iter()
                .find(|p| {
                    let rest = match p.motion {
                        PlatformMotion::Oscillating { origin, .. } => origin,
                        PlatformMotion::Static => p.position,
                    };
                    (obstacle.position.x - rest.x).abs() < 1e-5
                        && (obstacle.position.z - rest.z).abs() < 1e-5
                })
                .expect("obstacle must sit on a platform anchor");
            prop_assert!(matches!(host.motion, PlatformMotion::Static));
        }
    }
}
