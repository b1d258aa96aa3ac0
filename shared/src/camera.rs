//! Screen-space to world-space ray conversion.

use bevy::math::{Dir3, Ray3d, Vec2, Vec3};

/// Anything that can turn a point in normalized device coordinates into a
/// world-space ray.
pub trait PointerCamera {
    /// `ndc` has x to the right and y up, both in `[-1, 1]`.
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d>;
}

/// Converts a screen position (origin top-left, y down) into normalized
/// device coordinates. Returns `None` for an empty viewport.
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        screen.x / viewport.x * 2.0 - 1.0,
        -(screen.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Plain perspective camera, used without a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveRig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width divided by height.
    pub aspect: f32,
}

impl PerspectiveRig {
    pub fn set_viewport(&mut self, viewport: Vec2) {
        if viewport.y > 0.0 {
            self.aspect = viewport.x / viewport.y;
        }
    }
}

impl Default for PerspectiveRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 15.0, 30.0),
            target: Vec3::ZERO,
            fov_y: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
        }
    }
}

impl PointerCamera for PerspectiveRig {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        let forward = (self.target - self.position).try_normalize()?;
        let right = forward
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let up = right.cross(forward);

        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect;
        let direction = forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);

        Dir3::new(direction)
            .ok()
            .map(|direction| Ray3d::new(self.position, direction))
    }
}
