use bevy::prelude::*;
use shared::RainState;

use crate::rain::Rain;

#[derive(Component)]
pub struct DropletCountText;

#[derive(Component)]
pub struct RainStateText;

#[derive(Component)]
pub struct TickText;

pub fn droplet_count_text_update_system(
    query: Query<Entity, With<DropletCountText>>,
    mut writer: TextUiWriter,
    rain: Res<Rain>,
) {
    for entity in query.iter() {
        *writer.text(entity, 0) = format!("Droplets: {}", rain.0.registry().len());
    }
}

pub fn rain_state_text_update_system(
    query: Query<Entity, With<RainStateText>>,
    mut writer: TextUiWriter,
    rain: Res<Rain>,
) {
    for entity in query.iter() {
        *writer.text(entity, 0) = format!("Rain: {}", format_rain_state(rain.0.state()));
    }
}

pub fn tick_text_update_system(
    query: Query<Entity, With<TickText>>,
    mut writer: TextUiWriter,
    rain: Res<Rain>,
) {
    let clock = rain.0.clock();
    for entity in query.iter() {
        *writer.text(entity, 0) = format!("Tick: {} ({:.1}s)", clock.ticks(), clock.elapsed());
    }
}

fn format_rain_state(state: RainState) -> &'static str {
    match state {
        RainState::Raining => "Raining",
        RainState::Paused => "Paused",
    }
}
