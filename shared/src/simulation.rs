//! The rain simulation context: registry, clock, interaction and RNG in one
//! place, owned by whoever drives the frame loop.

use bevy::math::Vec3;
use bevy_log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::PointerCamera;
use crate::clock::SimulationClock;
use crate::config::RainConfig;
use crate::constants::SPAWN_HEIGHT;
use crate::droplet::Droplet;
use crate::interaction::{
    InteractionController, InteractionEvent, InteractionOutcome, RainState, ShatterTarget,
};
use crate::registry::{DropletId, DropletRegistry};
use crate::scene::DropletScene;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub delta: f32,
    /// Droplets integrated this tick; zero while paused.
    pub updated: usize,
    /// Droplets that fell through the ground and were lifted back up.
    pub recycled: usize,
}

pub struct RainSimulation<H> {
    registry: DropletRegistry<H>,
    clock: SimulationClock,
    controller: InteractionController,
    rng: StdRng,
    config: RainConfig,
}

impl<H: Copy> RainSimulation<H> {
    pub fn new(config: RainConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            registry: DropletRegistry::new(),
            clock: SimulationClock::new(config.fixed_delta),
            controller: InteractionController::new(config.click_slop, config.fragment_style),
            rng,
            config,
        }
    }

    pub fn registry(&self) -> &DropletRegistry<H> {
        &self.registry
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn state(&self) -> RainState {
        self.controller.state()
    }

    pub fn spawn_droplet<S>(&mut self, position: Vec3, size: f32, scene: &mut S) -> DropletId
    where
        S: DropletScene<Handle = H>,
    {
        let droplet = Droplet::create(position, size, &mut self.rng, scene);
        self.registry.add(droplet)
    }

    /// Scatters the configured number of droplets over the spawn area.
    pub fn spawn_initial_rain<S>(&mut self, scene: &mut S) -> usize
    where
        S: DropletScene<Handle = H>,
    {
        let extent = self.config.spawn_extent;
        for _ in 0..self.config.droplet_count {
            let position = Vec3::new(
                self.rng.gen_range(-extent..extent),
                self.rng.gen_range(SPAWN_HEIGHT),
                self.rng.gen_range(-extent..extent),
            );
            let size = self.rng.gen_range(self.config.size_min..self.config.size_max);
            self.spawn_droplet(position, size, scene);
        }

        info!("Spawned {} droplets", self.config.droplet_count);
        self.config.droplet_count
    }

    /// Advances the simulation by one fixed step.
    ///
    /// Only droplets alive when the tick starts are updated.
    pub fn tick<S>(&mut self, scene: &mut S) -> TickReport
    where
        S: DropletScene<Handle = H>,
    {
        let delta = self.clock.tick();
        let mut report = TickReport {
            delta,
            ..Default::default()
        };

        if !self.controller.is_raining() {
            return report;
        }

        let rng = &mut self.rng;
        self.registry.for_each_active(|registry, id| {
            let Some(droplet) = registry.get_mut(id) else {
                return;
            };
            report.updated += 1;
            if droplet.update(delta, rng, scene) {
                report.recycled += 1;
            }
        });

        report
    }

    pub fn dispatch<S, C>(
        &mut self,
        event: InteractionEvent,
        camera: &C,
        scene: &mut S,
    ) -> InteractionOutcome
    where
        S: DropletScene<Handle = H>,
        C: PointerCamera + ?Sized,
    {
        self.controller.dispatch(
            event,
            camera,
            ShatterTarget {
                registry: &mut self.registry,
                scene,
                rng: &mut self.rng,
            },
        )
    }

    /// Destroys every droplet and starts the rain over.
    pub fn reset<S>(&mut self, scene: &mut S) -> usize
    where
        S: DropletScene<Handle = H>,
    {
        let removed = self.registry.drain();
        debug!("Reset removed {} droplets", removed.len());
        for droplet in removed {
            droplet.destroy(scene);
        }
        self.spawn_initial_rain(scene)
    }
}
