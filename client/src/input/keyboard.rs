use crate::{input::data::GameAction, KeyMap};
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::Path,
};

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "serialization failed"))?;
    if let Some(parent) = binds_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(binds_path)?;
    file.write_all(serialized.as_bytes())
}

pub fn is_action_just_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|key_codes| key_codes.iter().any(|key| keyboard_input.just_pressed(*key)))
}

pub fn get_action_keys(action: GameAction, key_map: &KeyMap) -> Vec<KeyCode> {
    key_map.map.get(&action).cloned().unwrap_or_default()
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::ToggleRain, vec![KeyCode::Space]);
    map.insert(GameAction::ResetRain, vec![KeyCode::KeyR]);
    map.insert(GameAction::ToggleHud, vec![KeyCode::F3]);
    map
}

/// Reads the key bindings at `binds_path`, falling back to (and writing out)
/// the defaults when the file is missing or unreadable.
pub fn get_bindings(binds_path: &Path) -> KeyMap {
    if let Ok(content) = fs::read_to_string(binds_path) {
        if let Ok(key_map) = from_str::<KeyMap>(&content) {
            return key_map;
        }
        warn!("Ignoring malformed keybindings file at {:?}", binds_path);
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, binds_path) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}
