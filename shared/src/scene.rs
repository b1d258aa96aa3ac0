//! Contract between the droplet core and whatever draws it.
//!
//! The core never talks to a renderer directly. Every droplet owns exactly one
//! handle returned by [`DropletScene::spawn_droplet`] and gives it back through
//! [`DropletScene::despawn_droplet`] when the droplet goes away.

use std::collections::BTreeMap;
use std::fmt::Debug;

use bevy::math::Vec3;
use bevy_log::warn;

/// Scene-graph operations the simulation needs from a rendering backend.
pub trait DropletScene {
    /// Opaque reference to a renderable owned by a single droplet.
    type Handle: Copy + Eq + Debug;

    /// Inserts a sphere of `radius` at `position` into the scene.
    fn spawn_droplet(&mut self, position: Vec3, radius: f32) -> Self::Handle;

    /// Moves an existing renderable so it matches the droplet's position.
    fn move_droplet(&mut self, handle: Self::Handle, position: Vec3);

    /// Removes the renderable from the scene. The handle is dead afterwards.
    fn despawn_droplet(&mut self, handle: Self::Handle);
}

/// Backend-agnostic description of a translucent surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropletMaterial {
    /// sRGB base color.
    pub base_color: [u8; 3],
    pub opacity: f32,
    pub roughness: f32,
    /// Share of light passing through the surface (0 = opaque, 1 = clear).
    pub transmission: f32,
    pub reflectance: f32,
    pub thickness: f32,
}

impl DropletMaterial {
    /// Light blue, nearly fully transmissive water.
    pub const fn water() -> Self {
        Self {
            base_color: [0x33, 0x99, 0xff],
            opacity: 1.0,
            roughness: 0.02,
            transmission: 0.98,
            reflectance: 0.9,
            thickness: 0.0,
        }
    }

    /// Faint, almost invisible pane the rain falls onto.
    pub const fn glass() -> Self {
        Self {
            base_color: [0xff, 0xff, 0xff],
            opacity: 0.1,
            roughness: 0.02,
            transmission: 0.95,
            reflectance: 0.5,
            thickness: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessRenderable {
    pub position: Vec3,
    pub radius: f32,
}

/// In-memory scene used when there is no window to draw into.
///
/// Handles are never reused, so a stale handle is always detectable.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u64,
    live: BTreeMap<u64, HeadlessRenderable>,
    spawned: u64,
    despawned: u64,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: u64) -> Option<&HeadlessRenderable> {
        self.live.get(&handle)
    }

    /// Number of renderables currently in the scene.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn total_spawned(&self) -> u64 {
        self.spawned
    }

    pub fn total_despawned(&self) -> u64 {
        self.despawned
    }
}

impl DropletScene for HeadlessScene {
    type Handle = u64;

    fn spawn_droplet(&mut self, position: Vec3, radius: f32) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.spawned += 1;
        self.live
            .insert(handle, HeadlessRenderable { position, radius });
        handle
    }

    fn move_droplet(&mut self, handle: u64, position: Vec3) {
        match self.live.get_mut(&handle) {
            Some(renderable) => renderable.position = position,
            None => warn!("Tried to move unknown renderable {}", handle),
        }
    }

    fn despawn_droplet(&mut self, handle: u64) {
        if self.live.remove(&handle).is_some() {
            self.despawned += 1;
        } else {
            warn!("Tried to despawn unknown renderable {}", handle);
        }
    }
}
