//! Translates raw Bevy input into rain interaction events.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use shared::InteractionEvent;

use crate::input::data::GameAction;
use crate::input::keyboard::is_action_just_pressed;
use crate::rain::{RainInputEvent, ResetRainEvent};
use crate::KeyMap;

pub fn pointer_input_system(
    mouse_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut ev_input: EventWriter<RainInputEvent>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    // Presses outside the window (or over decorations) have no cursor position.
    let Some(position) = window.cursor_position() else {
        return;
    };

    if mouse_input.just_pressed(MouseButton::Left) {
        ev_input.write(RainInputEvent(InteractionEvent::PointerDown { position }));
    }
    if mouse_input.just_released(MouseButton::Left) {
        ev_input.write(RainInputEvent(InteractionEvent::PointerUp { position }));
    }
}

pub fn keyboard_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut ev_input: EventWriter<RainInputEvent>,
    mut ev_reset: EventWriter<ResetRainEvent>,
) {
    if is_action_just_pressed(GameAction::ToggleRain, &keyboard_input, &key_map) {
        ev_input.write(RainInputEvent(InteractionEvent::ToggleRain));
    }
    if is_action_just_pressed(GameAction::ResetRain, &keyboard_input, &key_map) {
        ev_reset.write(ResetRainEvent);
    }
}

pub fn window_resize_system(
    mut resize_events: EventReader<WindowResized>,
    mut ev_input: EventWriter<RainInputEvent>,
) {
    for event in resize_events.read() {
        ev_input.write(RainInputEvent(InteractionEvent::Resize {
            width: event.width,
            height: event.height,
        }));
    }
}

/// Reports the starting window size, since no resize event fires for it.
pub fn initial_viewport_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut ev_input: EventWriter<RainInputEvent>,
) {
    if let Ok(window) = windows.single() {
        ev_input.write(RainInputEvent(InteractionEvent::Resize {
            width: window.width(),
            height: window.height(),
        }));
    }
}
