//! Arena of live droplets addressed by stable, generation-checked ids.

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::math::{Ray3d, Vec3};

use crate::droplet::Droplet;

/// Stable handle to a droplet in a [`DropletRegistry`].
///
/// Slots are reused after removal, but the generation makes an id from a
/// removed droplet permanently stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropletId {
    index: u32,
    generation: u32,
}

/// Result of a successful [`DropletRegistry::hit_test`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: DropletId,
    /// Distance from the ray origin to the impact point.
    pub distance: f32,
    /// World-space impact point on the droplet's surface.
    pub point: Vec3,
}

#[derive(Debug)]
struct Slot<H> {
    generation: u32,
    droplet: Option<Droplet<H>>,
}

#[derive(Debug)]
pub struct DropletRegistry<H> {
    slots: Vec<Slot<H>>,
    free: Vec<u32>,
    len: usize,
}

impl<H> Default for DropletRegistry<H> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<H: Copy> DropletRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn add(&mut self, droplet: Droplet<H>) -> DropletId {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.droplet = Some(droplet);
            return DropletId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            droplet: Some(droplet),
        });
        DropletId {
            index,
            generation: 0,
        }
    }

    /// Takes the droplet out of the registry. Its renderable is still alive;
    /// the caller decides whether to destroy or fragment it.
    pub fn remove(&mut self, id: DropletId) -> Option<Droplet<H>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let droplet = slot.droplet.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(droplet)
    }

    pub fn get(&self, id: DropletId) -> Option<&Droplet<H>> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.droplet.as_ref())
    }

    pub fn get_mut(&mut self, id: DropletId) -> Option<&mut Droplet<H>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.droplet.as_mut())
    }

    pub fn contains(&self, id: DropletId) -> bool {
        self.get(id).is_some()
    }

    /// Ids of every live droplet, in slot order.
    pub fn active_ids(&self) -> Vec<DropletId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DropletId, &Droplet<H>)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.droplet.as_ref().map(|droplet| {
                (
                    DropletId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    droplet,
                )
            })
        })
    }

    /// Calls `f` once for every droplet live when the call starts.
    ///
    /// `f` may add or remove droplets. Droplets added during the traversal are
    /// not visited, and droplets removed before their turn are skipped.
    pub fn for_each_active<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self, DropletId),
    {
        for id in self.active_ids() {
            if self.contains(id) {
                f(self, id);
            }
        }
    }

    /// Finds the droplet whose sphere the ray enters closest to its origin.
    ///
    /// Equal distances resolve to the lowest slot.
    pub fn hit_test(&self, ray: Ray3d) -> Option<RayHit> {
        let cast = RayCast3d::from_ray(ray, f32::MAX);

        let mut nearest: Option<(DropletId, f32)> = None;
        for (id, droplet) in self.iter() {
            let sphere = BoundingSphere::new(droplet.position(), droplet.size());
            let Some(distance) = cast.sphere_intersection_at(&sphere) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((id, distance));
            }
        }

        nearest.map(|(id, distance)| RayHit {
            id,
            distance,
            point: ray.get_point(distance),
        })
    }

    /// Removes every droplet, handing them back in slot order.
    pub fn drain(&mut self) -> Vec<Droplet<H>> {
        let ids = self.active_ids();
        ids.into_iter().filter_map(|id| self.remove(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;
    use bevy::math::Dir3;

    fn droplet_at(scene: &mut HeadlessScene, position: Vec3, size: f32) -> Droplet<u64> {
        Droplet::with_velocity(position, size, Vec3::NEG_Y, scene)
    }

    #[test]
    fn test_add_remove() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        let a = registry.add(droplet_at(&mut scene, Vec3::ZERO, 0.1));
        let b = registry.add(droplet_at(&mut scene, Vec3::ONE, 0.1));
        assert_eq!(registry.len(), 2);

        let removed = registry.remove(a).unwrap();
        assert_eq!(removed.position(), Vec3::ZERO);
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(a));
        assert!(registry.contains(b));
        assert!(registry.remove(a).is_none());
    }

    #[test]
    fn test_stale_id_does_not_alias_reused_slot() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        let a = registry.add(droplet_at(&mut scene, Vec3::ZERO, 0.1));
        registry.remove(a);
        let c = registry.add(droplet_at(&mut scene, Vec3::X, 0.1));

        assert_ne!(a, c);
        assert!(registry.get(a).is_none());
        assert_eq!(registry.get(c).unwrap().position(), Vec3::X);
    }

    #[test]
    fn test_for_each_active_tolerates_mutation() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        let ids: Vec<_> = (0..4)
            .map(|i| registry.add(droplet_at(&mut scene, Vec3::X * i as f32, 0.1)))
            .collect();

        let mut visited = Vec::new();
        registry.for_each_active(|registry, id| {
            visited.push(id);
            if id == ids[0] {
                // Replace the first droplet with two new ones mid-traversal.
                registry.remove(id);
                registry.add(droplet_at(&mut scene, Vec3::Y, 0.05));
                registry.add(droplet_at(&mut scene, Vec3::Z, 0.05));
            }
            if id == ids[1] {
                registry.remove(ids[2]);
            }
        });

        assert_eq!(visited, vec![ids[0], ids[1], ids[3]]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_hit_test_empty_registry() {
        let registry: DropletRegistry<u64> = DropletRegistry::new();
        let ray = Ray3d::new(Vec3::ZERO, Dir3::NEG_Z);
        assert!(registry.hit_test(ray).is_none());
    }

    #[test]
    fn test_hit_test_returns_nearest() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        let far = registry.add(droplet_at(&mut scene, Vec3::new(0.0, 0.0, -10.0), 0.5));
        let near = registry.add(droplet_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), 0.5));
        registry.add(droplet_at(&mut scene, Vec3::new(3.0, 0.0, -2.0), 0.5));

        let ray = Ray3d::new(Vec3::ZERO, Dir3::NEG_Z);
        let hit = registry.hit_test(ray).unwrap();
        assert_eq!(hit.id, near);
        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, -4.5)).length() < 1e-4);

        registry.remove(near);
        assert_eq!(registry.hit_test(ray).unwrap().id, far);
    }

    #[test]
    fn test_hit_test_miss() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        registry.add(droplet_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), 0.5));

        let ray = Ray3d::new(Vec3::new(2.0, 0.0, 0.0), Dir3::NEG_Z);
        assert!(registry.hit_test(ray).is_none());

        // Pointing away from the droplet.
        let ray = Ray3d::new(Vec3::ZERO, Dir3::Z);
        assert!(registry.hit_test(ray).is_none());
    }

    #[test]
    fn test_hit_test_ties_resolve_to_lowest_slot() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        let first = registry.add(droplet_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), 0.5));
        registry.add(droplet_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), 0.5));

        let ray = Ray3d::new(Vec3::ZERO, Dir3::NEG_Z);
        assert_eq!(registry.hit_test(ray).unwrap().id, first);
    }

    #[test]
    fn test_drain_empties_registry() {
        let mut scene = HeadlessScene::new();
        let mut registry = DropletRegistry::new();
        for i in 0..3 {
            registry.add(droplet_at(&mut scene, Vec3::X * i as f32, 0.1));
        }
        let drained = registry.drain();
        assert_eq!(drained.len(), 3);
        assert!(registry.is_empty());
        assert!(registry.active_ids().is_empty());
    }
}
