//! A single falling droplet.

use bevy::math::Vec3;
use rand::Rng;

use crate::config::FragmentStyle;
use crate::constants::*;
use crate::scene::DropletScene;

/// A falling sphere and the renderable that shows it.
///
/// The renderable is created together with the droplet and released when the
/// droplet is destroyed or fragmented, so no two droplets ever share one.
#[derive(Debug, PartialEq)]
pub struct Droplet<H> {
    position: Vec3,
    velocity: Vec3,
    size: f32,
    renderable: H,
}

impl<H: Copy> Droplet<H> {
    /// Spawns a droplet falling straight down at a random speed.
    pub fn create<S, R>(position: Vec3, size: f32, rng: &mut R, scene: &mut S) -> Self
    where
        S: DropletScene<Handle = H>,
        R: Rng + ?Sized,
    {
        let velocity = Vec3::new(0.0, -rng.gen_range(FALL_SPEED), 0.0);
        Self::with_velocity(position, size, velocity, scene)
    }

    pub fn with_velocity<S>(position: Vec3, size: f32, velocity: Vec3, scene: &mut S) -> Self
    where
        S: DropletScene<Handle = H>,
    {
        debug_assert!(size > 0.0, "droplet size must be positive, got {size}");
        let renderable = scene.spawn_droplet(position, size);
        Self {
            position,
            velocity,
            size,
            renderable,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn renderable(&self) -> H {
        self.renderable
    }

    /// Integrates the droplet over `delta` seconds.
    ///
    /// A droplet that falls through the ground is lifted back to a random
    /// height with its velocity and horizontal position untouched. Returns
    /// whether that happened.
    pub fn update<S, R>(&mut self, delta: f32, rng: &mut R, scene: &mut S) -> bool
    where
        S: DropletScene<Handle = H>,
        R: Rng + ?Sized,
    {
        self.position += self.velocity * delta;

        let recycled = self.position.y < GROUND_LEVEL;
        if recycled {
            self.position.y = rng.gen_range(SPAWN_HEIGHT);
        }

        scene.move_droplet(self.renderable, self.position);
        recycled
    }

    /// Breaks the droplet into [`FRAGMENT_COUNT`] smaller droplets.
    ///
    /// The parent's renderable leaves the scene; the fragments start at the
    /// parent's position. Registering the fragments is up to the caller.
    pub fn fragment<S, R>(
        self,
        impact: Vec3,
        style: FragmentStyle,
        rng: &mut R,
        scene: &mut S,
    ) -> Vec<Droplet<H>>
    where
        S: DropletScene<Handle = H>,
        R: Rng + ?Sized,
    {
        scene.despawn_droplet(self.renderable);

        (0..FRAGMENT_COUNT)
            .map(|_| {
                let size = self.size * rng.gen_range(FRAGMENT_SIZE_FACTOR);
                let velocity = fragment_velocity(style, self.position, impact, rng);
                Droplet::with_velocity(self.position, size, velocity, scene)
            })
            .collect()
    }

    /// Removes the droplet's renderable from the scene.
    pub fn destroy<S>(self, scene: &mut S)
    where
        S: DropletScene<Handle = H>,
    {
        scene.despawn_droplet(self.renderable);
    }
}

fn fragment_velocity<R>(style: FragmentStyle, origin: Vec3, impact: Vec3, rng: &mut R) -> Vec3
where
    R: Rng + ?Sized,
{
    match style {
        FragmentStyle::Drizzle => Vec3::new(
            rng.gen_range(FRAGMENT_HORIZONTAL_SPEED),
            rng.gen_range(FRAGMENT_VERTICAL_SPEED),
            rng.gen_range(FRAGMENT_HORIZONTAL_SPEED),
        ),
        FragmentStyle::Burst => {
            // A hit dead on top leaves no horizontal direction; fall back to drizzle.
            let away = (origin - impact).with_y(0.0).normalize_or_zero();
            if away == Vec3::ZERO {
                return fragment_velocity(FragmentStyle::Drizzle, origin, impact, rng);
            }
            let speed = rng.gen_range(FRAGMENT_BURST_SPEED);
            Vec3::new(
                away.x * speed,
                rng.gen_range(FRAGMENT_VERTICAL_SPEED),
                away.z * speed,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_create_falls_straight_down() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        for _ in 0..100 {
            let droplet = Droplet::create(Vec3::new(1.0, 12.0, -3.0), 0.1, &mut rng, &mut scene);
            let velocity = droplet.velocity();
            assert_eq!(velocity.x, 0.0);
            assert_eq!(velocity.z, 0.0);
            assert!(-velocity.y >= 1.0 && -velocity.y < 3.0);

            let renderable = scene.get(droplet.renderable()).unwrap();
            assert_eq!(renderable.position, Vec3::new(1.0, 12.0, -3.0));
            assert_eq!(renderable.radius, 0.1);
        }
        assert_eq!(scene.len(), 100);
    }

    #[test]
    fn test_update_integrates_and_recycles() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let mut droplet = Droplet::with_velocity(
            Vec3::new(0.0, 5.0, 0.0),
            0.1,
            Vec3::new(0.0, -2.0, 0.0),
            &mut scene,
        );

        assert!(!droplet.update(1.0, &mut rng, &mut scene));
        assert_eq!(droplet.position(), Vec3::new(0.0, 3.0, 0.0));

        assert!(droplet.update(2.0, &mut rng, &mut scene));
        let y = droplet.position().y;
        assert!((10.0..20.0).contains(&y), "recycled to {y}");
        assert_eq!(droplet.position().x, 0.0);
        assert_eq!(droplet.position().z, 0.0);
        assert_eq!(droplet.velocity(), Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(
            scene.get(droplet.renderable()).unwrap().position,
            droplet.position()
        );
    }

    #[test]
    fn test_never_below_ground_after_update() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let mut droplet = Droplet::with_velocity(
            Vec3::new(2.0, 0.5, 2.0),
            0.05,
            Vec3::new(0.1, -7.5, 0.0),
            &mut scene,
        );
        for step in 0..2_000 {
            let delta = 0.016 * (1 + step % 7) as f32;
            droplet.update(delta, &mut rng, &mut scene);
            assert!(droplet.position().y >= 0.0);
        }
    }

    #[test]
    fn test_fragment_produces_five_smaller_children() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let parent = Droplet::create(Vec3::new(2.0, 3.0, 4.0), 0.12, &mut rng, &mut scene);
        let parent_handle = parent.renderable();

        let children = parent.fragment(
            Vec3::new(2.0, 3.1, 4.0),
            FragmentStyle::Drizzle,
            &mut rng,
            &mut scene,
        );

        assert_eq!(children.len(), 5);
        assert!(scene.get(parent_handle).is_none());
        assert_eq!(scene.len(), 5);
        for child in &children {
            assert!(child.size() >= 0.06 && child.size() <= 0.12);
            assert_eq!(child.position(), Vec3::new(2.0, 3.0, 4.0));
            let velocity = child.velocity();
            assert!(velocity.x >= -0.25 && velocity.x < 0.25);
            assert!(velocity.z >= -0.25 && velocity.z < 0.25);
            assert!(velocity.y >= -3.0 && velocity.y < -1.0);
        }
    }

    #[test]
    fn test_fragment_children_do_not_share_position() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let parent = Droplet::create(Vec3::new(0.0, 8.0, 0.0), 0.1, &mut rng, &mut scene);
        let mut children = parent.fragment(Vec3::ZERO, FragmentStyle::Drizzle, &mut rng, &mut scene);

        children[0].update(1.0, &mut rng, &mut scene);
        assert_ne!(children[0].position(), children[1].position());
        assert_eq!(children[1].position(), Vec3::new(0.0, 8.0, 0.0));
    }

    #[test]
    fn test_burst_fragments_move_away_from_impact() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let parent = Droplet::create(Vec3::new(0.0, 10.0, 0.0), 0.1, &mut rng, &mut scene);
        let children = parent.fragment(
            Vec3::new(-0.1, 10.0, 0.0),
            FragmentStyle::Burst,
            &mut rng,
            &mut scene,
        );

        for child in &children {
            let velocity = child.velocity();
            assert!(velocity.x >= 0.25 && velocity.x < 1.0);
            assert!(velocity.z.abs() < 1e-6);
            assert!(velocity.y >= -3.0 && velocity.y < -1.0);
        }
    }

    #[test]
    fn test_burst_hit_from_above_or_below_drizzles() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let center = Vec3::new(1.0, 10.0, -2.0);
        let radius = 0.1;

        for impact in [center + Vec3::Y * radius, center - Vec3::Y * radius] {
            let parent = Droplet::create(center, radius, &mut rng, &mut scene);
            let children = parent.fragment(impact, FragmentStyle::Burst, &mut rng, &mut scene);

            assert_eq!(children.len(), 5);
            for child in &children {
                let velocity = child.velocity();
                assert!(velocity.x >= -0.25 && velocity.x < 0.25);
                assert!(velocity.z >= -0.25 && velocity.z < 0.25);
                assert!(velocity.y >= -3.0 && velocity.y < -1.0);
            }
        }
    }

    #[test]
    fn test_destroy_releases_renderable() {
        let mut scene = HeadlessScene::new();
        let mut rng = rng();
        let droplet = Droplet::create(Vec3::Y * 15.0, 0.1, &mut rng, &mut scene);
        droplet.destroy(&mut scene);
        assert!(scene.is_empty());
    }
}
