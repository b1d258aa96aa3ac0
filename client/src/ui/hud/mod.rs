pub mod stats;

use bevy::prelude::*;
use shared::sets::RainUpdateSet;

use crate::input::data::GameAction;
use crate::input::keyboard::{get_action_keys, is_action_just_pressed};
use crate::KeyMap;
pub use stats::*;

/// Marker to find the container entity so we can show/hide the HUD
#[derive(Component)]
pub struct HudRoot;

pub fn hud_plugin(app: &mut App) {
    app.add_systems(Startup, setup_hud).add_systems(
        Update,
        (
            droplet_count_text_update_system,
            rain_state_text_update_system,
            tick_text_update_system,
            toggle_hud_system,
        )
            .in_set(RainUpdateSet::Ui),
    );
}

fn hud_line(label: &str) -> impl Bundle {
    (
        Text::new(label),
        TextFont::from_font_size(crate::constants::HUD_FONT_SIZE),
        TextColor(Color::WHITE),
    )
}

pub fn setup_hud(mut commands: Commands, key_map: Res<KeyMap>) {
    let keys = |action| {
        get_action_keys(action, &key_map)
            .iter()
            .map(|key| format!("{:?}", key))
            .collect::<Vec<_>>()
            .join("/")
    };
    let help = format!(
        "Click: shatter / toggle rain, drag: orbit, {}: toggle rain, {}: reset, {}: hide HUD",
        keys(GameAction::ToggleRain),
        keys(GameAction::ResetRain),
        keys(GameAction::ToggleHud)
    );

    commands
        .spawn((
            HudRoot,
            // give it a dark background for readability over the white sky
            BackgroundColor(Color::BLACK.with_alpha(0.5)),
            GlobalZIndex(i32::MAX),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                right: Val::Auto,
                padding: UiRect::all(Val::Px(4.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((DropletCountText, hud_line("Droplets: -")));
            root.spawn((RainStateText, hud_line("Rain: -")));
            root.spawn((TickText, hud_line("Tick: -")));
            root.spawn(hud_line(&help));
        });
}

pub fn toggle_hud_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut query: Query<&mut Visibility, With<HudRoot>>,
) {
    if !is_action_just_pressed(GameAction::ToggleHud, &keyboard_input, &key_map) {
        return;
    }
    for mut visibility in query.iter_mut() {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            _ => Visibility::Hidden,
        };
    }
}
