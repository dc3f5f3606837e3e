//! Axis-aligned bounding box collision for ball vs track entities
//!
//! Everything on the track collides as an AABB. Platforms are yaw-rotated
//! boxes, so their world-space AABB widens with the rotation; obstacles and
//! collectibles spin cosmetically only and collide with their unrotated
//! extents.

use glam::Vec3;

/// An axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// AABB of a cube-shaped ball bound
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self::from_center_half_extents(center, Vec3::splat(radius))
    }

    /// World AABB of a box rotated by `yaw` around the vertical axis.
    ///
    /// The rotated footprint projects onto the axes as
    /// |cos|*hx + |sin|*hz by |sin|*hx + |cos|*hz; height is unaffected.
    pub fn from_rotated_box(center: Vec3, half: Vec3, yaw: f32) -> Self {
        let (sin, cos) = (yaw.sin().abs(), yaw.cos().abs());
        let half = Vec3::new(
            cos * half.x + sin * half.z,
            half.y,
            sin * half.x + cos * half.z,
        );
        Self::from_center_half_extents(center, half)
    }

    /// Overlap test, inclusive of touching faces (matches Box3.intersectsBox)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Result of resolving a descending ball against one platform box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Corrected ball center height: platform top + ball radius
    pub snap_y: f32,
}

/// Ground-contact resolution for one platform.
///
/// Returns a contact only when the boxes overlap and the ball is not moving
/// upward; an ascending ball passes through from below (no head bonk).
pub fn resolve_ground_contact(
    ball_pos: Vec3,
    ball_radius: f32,
    vel_y: f32,
    platform_box: &Aabb,
) -> Option<GroundContact> {
    if vel_y > 0.0 {
        return None;
    }
    let ball_box = Aabb::from_sphere(ball_pos, ball_radius);
    if ball_box.intersects(platform_box) {
        Some(GroundContact {
            snap_y: platform_box.max.y + ball_radius,
        })
    } else {
        None
    }
}
