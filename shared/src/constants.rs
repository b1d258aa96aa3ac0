use std::ops::Range;

/// Simulated seconds advanced by every tick, independent of wall-clock frame time.
pub const FIXED_DELTA: f32 = 0.016;

/// Droplets below this height are recycled instead of destroyed.
pub const GROUND_LEVEL: f32 = 0.0;
/// Height band a recycled or freshly spawned droplet is placed in.
pub const SPAWN_HEIGHT: Range<f32> = 10.0..20.0;

/// Downward speed of a freshly spawned droplet, in units per second.
pub const FALL_SPEED: Range<f32> = 1.0..3.0;

pub const FRAGMENT_COUNT: usize = 5;
/// Fraction of the parent's size inherited by each fragment.
pub const FRAGMENT_SIZE_FACTOR: Range<f32> = 0.5..1.0;
pub const FRAGMENT_HORIZONTAL_SPEED: Range<f32> = -0.25..0.25;
pub const FRAGMENT_VERTICAL_SPEED: Range<f32> = -3.0..-1.0;
/// Horizontal speed of a fragment thrown away from the impact point.
pub const FRAGMENT_BURST_SPEED: Range<f32> = 0.25..1.0;

pub const DEFAULT_DROPLET_COUNT: usize = 100;
/// Half-width of the square (x, z) area initial droplets are scattered over.
pub const DEFAULT_SPAWN_EXTENT: f32 = 10.0;
pub const DEFAULT_DROPLET_SIZE_MIN: f32 = 0.05;
pub const DEFAULT_DROPLET_SIZE_MAX: f32 = 0.15;
/// Pointer travel (logical pixels) below which a press/release pair counts as a click.
pub const DEFAULT_CLICK_SLOP: f32 = 4.0;

