//! Runs the simulation without a window, logging progress until a fixed
//! number of ticks has elapsed.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use shared::{HeadlessScene, RainConfig, RainSimulation};

use crate::constants::HEADLESS_SUMMARY_INTERVAL;

#[derive(Resource)]
pub struct HeadlessRun {
    pub sim: RainSimulation<u64>,
    pub scene: HeadlessScene,
    pub remaining: u64,
}

impl HeadlessRun {
    pub fn new(config: RainConfig, ticks: u64) -> Self {
        Self {
            sim: RainSimulation::new(config),
            scene: HeadlessScene::new(),
            remaining: ticks,
        }
    }

    /// Advances one tick. Returns false once the run is over.
    pub fn step(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;

        let report = self.sim.tick(&mut self.scene);
        let ticks = self.sim.clock().ticks();
        if ticks % HEADLESS_SUMMARY_INTERVAL == 0 || self.remaining == 0 {
            info!(
                "tick {} ({:.2}s): {} droplets, {} recycled this tick, {} renderables",
                ticks,
                self.sim.clock().elapsed(),
                self.sim.registry().len(),
                report.recycled,
                self.scene.len()
            );
        }
        self.remaining > 0
    }
}

pub fn run_headless(config: RainConfig, ticks: u64) -> AppExit {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)));
    app.add_plugins(bevy::log::LogPlugin::default());

    app.insert_resource(HeadlessRun::new(config, ticks))
        .add_systems(Startup, spawn_headless_rain)
        .add_systems(Update, headless_tick_system);

    app.run()
}

fn spawn_headless_rain(mut run: ResMut<HeadlessRun>) {
    let HeadlessRun { sim, scene, .. } = &mut *run;
    sim.spawn_initial_rain(scene);
}

fn headless_tick_system(mut run: ResMut<HeadlessRun>, mut ev_app_exit: EventWriter<AppExit>) {
    if !run.step() {
        info!(
            "Headless run finished after {} ticks",
            run.sim.clock().ticks()
        );
        ev_app_exit.write(AppExit::Success);
    }
}
