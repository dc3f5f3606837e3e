//! Catmull-Rom curve fitting for track layout
//!
//! The track builder random-walks a handful of control points and needs a
//! smooth C¹ curve *through* them (not an approximation) to place platforms
//! on. Uniform Catmull-Rom with clamped endpoints does exactly that: each
//! segment interpolates its two middle control points, and tangents are
//! shared across segment boundaries.

use glam::Vec3;

/// A uniform Catmull-Rom spline through an ordered list of 3D points
#[derive(Debug, Clone)]
pub struct CatmullRom3 {
    points: Vec<Vec3>,
}

impl CatmullRom3 {
    /// Build a spline through `points`. Needs at least two points.
    pub fn new(points: Vec<Vec3>) -> Self {
        assert!(
            points.len() >= 2,
            "Catmull-Rom spline needs at least 2 control points, got {}",
            points.len()
        );
        Self { points }
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Evaluate the curve at parameter `t` in [0, 1].
    ///
    /// The parameter is uniform across segments (not arc length): segment i
    /// of n-1 covers t in [i/(n-1), (i+1)/(n-1)]. Endpoints are clamped by
    /// duplicating the first and last control points.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let segments = n - 1;
        let scaled = t.clamp(0.0, 1.0) * segments as f32;
        // Last parameter lands exactly on the final point
        let seg = (scaled as usize).min(segments - 1);
        let u = scaled - seg as f32;

        let p0 = self.points[seg.saturating_sub(1)];
        let p1 = self.points[seg];
        let p2 = self.points[seg + 1];
        let p3 = self.points[(seg + 2).min(n - 1)];

        catmull_rom(p0, p1, p2, p3, u)
    }

    /// Sample `divisions + 1` points uniformly in parameter space
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        assert!(divisions >= 1, "need at least one curve division");
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }
}

/// Uniform Catmull-Rom basis (tension 0.5) for one segment between p1 and p2
#[inline]
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
}
