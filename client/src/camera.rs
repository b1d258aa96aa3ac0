use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::constants::*;

/// Orbits the camera around a focus point with damped motion.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let radius = offset.length().max(ZOOM_RANGE.0);
        Self {
            focus,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn translation(&self) -> Vec3 {
        let horizontal = self.radius * self.pitch.cos();
        self.focus
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.radius * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation()).looking_at(self.focus, Vec3::Y)
    }

    /// Adds a drag impulse, in screen pixels.
    pub fn push(&mut self, drag: Vec2) {
        self.yaw_velocity -= drag.x * ORBIT_SENSITIVITY;
        self.pitch_velocity += drag.y * ORBIT_SENSITIVITY;
    }

    /// Applies the current velocity and lets it decay.
    pub fn step(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.yaw_velocity *= 1.0 - ORBIT_DAMPING;
        self.pitch_velocity *= 1.0 - ORBIT_DAMPING;
    }

    pub fn zoom(&mut self, amount: f32) {
        self.radius = (self.radius - amount * ZOOM_SPEED).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
    }
}

pub fn orbit_camera_system(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let scroll = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / 16.0,
    };

    for (mut orbit, mut transform) in cameras.iter_mut() {
        if mouse_input.pressed(MouseButton::Left) {
            orbit.push(mouse_motion.delta);
        }
        if scroll != 0.0 {
            orbit.zoom(scroll);
        }
        orbit.step();
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_round_trips_start_position() {
        let orbit = OrbitCamera::from_position(CAMERA_POSITION, Vec3::ZERO);
        assert!((orbit.translation() - CAMERA_POSITION).length() < 1e-4);
    }

    #[test]
    fn test_orbit_motion_decays() {
        let mut orbit = OrbitCamera::from_position(CAMERA_POSITION, Vec3::ZERO);
        orbit.push(Vec2::new(100.0, 0.0));
        orbit.step();
        let first = orbit.yaw;
        for _ in 0..500 {
            orbit.step();
        }
        let settled = orbit.yaw;
        orbit.step();
        assert!(first != 0.0);
        assert!((orbit.yaw - settled).abs() < 1e-6);
        assert!((orbit.translation().length() - orbit.radius).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_and_zoom_are_clamped() {
        let mut orbit = OrbitCamera::from_position(CAMERA_POSITION, Vec3::ZERO);
        orbit.push(Vec2::new(0.0, 1e6));
        orbit.step();
        assert!(orbit.pitch <= ORBIT_PITCH_LIMIT);

        orbit.zoom(1e6);
        assert_eq!(orbit.radius, ZOOM_RANGE.0);
        orbit.zoom(-1e6);
        assert_eq!(orbit.radius, ZOOM_RANGE.1);
    }
}
