mod camera;
mod constants;
mod headless;
mod input;
mod rain;
mod scene;
mod ui;

use std::collections::BTreeMap;
use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::PresentMode;
use clap::Parser;
use constants::{BACKGROUND_COLOR, DEFAULT_BINDS_PATH, DEFAULT_CONFIG_PATH, WINDOW_TITLE};
use input::{data::GameAction, keyboard::get_bindings};
use rain::Rain;
use serde::{Deserialize, Serialize};
use shared::{RainConfig, RainSimulation};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "Path to the rain config (RON)")]
    config: PathBuf,

    #[arg(long, default_value = DEFAULT_BINDS_PATH, help = "Path to the key bindings (RON)")]
    binds: PathBuf,

    #[arg(short, long, help = "Seed for a reproducible rain")]
    seed: Option<u64>,

    #[arg(short, long, help = "Number of droplets to start with")]
    droplets: Option<usize>,

    #[arg(
        long,
        value_name = "TICKS",
        help = "Run without a window for the given number of ticks, then exit"
    )]
    headless: Option<u64>,
}

#[derive(Resource, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "input::keyboard::default_key_map")]
    pub map: BTreeMap<GameAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: input::keyboard::default_key_map(),
        }
    }
}

/// Reads the config file and layers the command line on top of it.
fn resolve_config(args: &Args) -> RainConfig {
    let mut config = match RainConfig::load_or_create(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Using default rain config: {}", e);
            RainConfig::default()
        }
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(droplets) = args.droplets {
        config.droplet_count = droplets;
    }

    if let Err(e) = config.validate() {
        eprintln!("Using default rain config: {}", e);
        return RainConfig {
            seed: config.seed,
            ..Default::default()
        };
    }
    config
}

fn main() -> AppExit {
    let args = Args::parse();
    let config = resolve_config(&args);

    println!(
        "Starting with {} droplets from {}",
        config.droplet_count,
        args.config.display()
    );

    if let Some(ticks) = args.headless {
        return headless::run_headless(config, ticks);
    }

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(get_bindings(&args.binds))
        .insert_resource(Rain(RainSimulation::new(config)))
        .add_plugins((rain::rain_plugin, ui::hud::hud_plugin))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: PathBuf, extra: &[&str]) -> Args {
        let mut argv = vec!["client".to_string(), "--config".to_string()];
        argv.push(config.display().to_string());
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rain.ron");
        let config = resolve_config(&args(path.clone(), &["--seed", "5", "--droplets", "12"]));

        assert_eq!(config.seed, Some(5));
        assert_eq!(config.droplet_count, 12);
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_override_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rain.ron");
        std::fs::write(&path, "(size_min: 0.5, size_max: 0.1, droplet_count: 7)").unwrap();
        let config = resolve_config(&args(path, &["--seed", "3"]));

        assert_eq!(config.droplet_count, RainConfig::default().droplet_count);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_headless_flag_parses_tick_count() {
        let parsed = args(PathBuf::from("rain.ron"), &["--headless", "600"]);
        assert_eq!(parsed.headless, Some(600));
    }
}
