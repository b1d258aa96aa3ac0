use bevy::prelude::*;
use shared::sets::RainUpdateSet;
use shared::{InteractionEvent, InteractionOutcome, RainSimulation};

use crate::camera::orbit_camera_system;
use crate::input::pointer::{
    initial_viewport_system, keyboard_input_system, pointer_input_system, window_resize_system,
};
use crate::scene::{setup_scene, BevyDropletScene, BevyPointerCamera, RainCamera};

/// The simulation, with droplet renderables as entities.
#[derive(Resource)]
pub struct Rain(pub RainSimulation<Entity>);

#[derive(Event, Debug, Clone, Copy)]
pub struct RainInputEvent(pub InteractionEvent);

#[derive(Event, Debug, Clone, Copy)]
pub struct ResetRainEvent;

pub fn rain_plugin(app: &mut App) {
    app.add_event::<RainInputEvent>()
        .add_event::<ResetRainEvent>()
        .configure_sets(
            Update,
            (
                RainUpdateSet::Input,
                RainUpdateSet::Interaction,
                RainUpdateSet::Simulation,
                RainUpdateSet::Camera,
                RainUpdateSet::Ui,
            )
                .chain(),
        )
        .add_systems(
            Startup,
            (setup_scene, spawn_initial_rain, initial_viewport_system).chain(),
        )
        .add_systems(
            Update,
            (
                (
                    pointer_input_system,
                    keyboard_input_system,
                    window_resize_system,
                )
                    .in_set(RainUpdateSet::Input),
                (dispatch_rain_inputs, reset_rain_system)
                    .chain()
                    .in_set(RainUpdateSet::Interaction),
                tick_rain_system.in_set(RainUpdateSet::Simulation),
                orbit_camera_system.in_set(RainUpdateSet::Camera),
            ),
        );
}

fn spawn_initial_rain(mut rain: ResMut<Rain>, mut scene: BevyDropletScene) {
    rain.0.spawn_initial_rain(&mut scene);
}

fn dispatch_rain_inputs(
    mut events: EventReader<RainInputEvent>,
    mut rain: ResMut<Rain>,
    cameras: Query<(&Camera, &GlobalTransform), With<RainCamera>>,
    mut scene: BevyDropletScene,
) {
    let Ok((camera, transform)) = cameras.single() else {
        debug!("Rain camera not found");
        return;
    };
    let pointer_camera = BevyPointerCamera { camera, transform };

    for RainInputEvent(event) in events.read() {
        match rain.0.dispatch(*event, &pointer_camera, &mut scene) {
            InteractionOutcome::Toggled(state) => info!("Rain is now {:?}", state),
            InteractionOutcome::Shattered(shatter) => debug!(
                "Droplet {:?} shattered at {} into {} fragments",
                shatter.parent,
                shatter.impact,
                shatter.fragments.len()
            ),
            InteractionOutcome::Resized(viewport) => debug!("Viewport is now {}", viewport),
            InteractionOutcome::Missed | InteractionOutcome::Ignored => {}
        }
    }
}

fn reset_rain_system(
    mut events: EventReader<ResetRainEvent>,
    mut rain: ResMut<Rain>,
    mut scene: BevyDropletScene,
) {
    if events.read().count() == 0 {
        return;
    }
    let spawned = rain.0.reset(&mut scene);
    info!("Rain reset with {} droplets", spawned);
}

fn tick_rain_system(mut rain: ResMut<Rain>, mut scene: BevyDropletScene) {
    let report = rain.0.tick(&mut scene);
    if report.recycled > 0 {
        trace!("{} droplets recycled", report.recycled);
    }
}
