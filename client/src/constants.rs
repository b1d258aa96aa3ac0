use bevy::prelude::*;

pub const DEFAULT_CONFIG_PATH: &str = "rain.ron";
pub const DEFAULT_BINDS_PATH: &str = "binds.ron";

pub const WINDOW_TITLE: &str = "Glass Rain";
pub const BACKGROUND_COLOR: Color = Color::WHITE;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 15.0, 30.0);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const AMBIENT_BRIGHTNESS: f32 = 560.0;
pub const SUN_ILLUMINANCE: f32 = 8_000.0;
pub const SUN_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);

pub const GLASS_SIZE: f32 = 50.0;
pub const DROPLET_MESH_RESOLUTION: u32 = 16;

pub const ORBIT_SENSITIVITY: f32 = 0.0025;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_PITCH_LIMIT: f32 = 1.5;
pub const ZOOM_SPEED: f32 = 1.5;
pub const ZOOM_RANGE: (f32, f32) = (5.0, 120.0);

pub const HUD_FONT_SIZE: f32 = 16.0;

/// Headless runs log a summary every this many ticks.
pub const HEADLESS_SUMMARY_INTERVAL: u64 = 60;
