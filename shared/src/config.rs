//! Rain configuration, stored as a RON file next to the executable.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bevy_log::info;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rain configuration: {0}")]
    Parse(String),
    #[error("could not serialize rain configuration: {0}")]
    Serialize(String),
    #[error("invalid rain configuration: {0}")]
    Invalid(String),
}

/// How the fragments of a shattered droplet move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FragmentStyle {
    /// Fragments keep falling with a small random horizontal drift.
    #[default]
    Drizzle,
    /// Fragments are thrown horizontally away from the impact point.
    Burst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Droplets spawned when the rain starts or is reset.
    pub droplet_count: usize,
    /// Initial droplets are scattered over `[-extent, extent)` on x and z.
    pub spawn_extent: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Seconds of simulated time per tick.
    pub fixed_delta: f32,
    pub click_slop: f32,
    pub fragment_style: FragmentStyle,
    /// Fixed RNG seed; a fresh entropy seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            droplet_count: DEFAULT_DROPLET_COUNT,
            spawn_extent: DEFAULT_SPAWN_EXTENT,
            size_min: DEFAULT_DROPLET_SIZE_MIN,
            size_max: DEFAULT_DROPLET_SIZE_MAX,
            fixed_delta: FIXED_DELTA,
            click_slop: DEFAULT_CLICK_SLOP,
            fragment_style: FragmentStyle::default(),
            seed: None,
        }
    }
}

impl RainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The spawn range is -extent..extent, so its width must stay finite too.
        if !(self.spawn_extent > 0.0 && (2.0 * self.spawn_extent).is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "spawn_extent must be positive and finite, got {}",
                self.spawn_extent
            )));
        }
        if !(self.size_min > 0.0
            && self.size_min < self.size_max
            && self.size_max.is_finite())
        {
            return Err(ConfigError::Invalid(format!(
                "droplet sizes must satisfy 0 < size_min < size_max, got {}..{}",
                self.size_min, self.size_max
            )));
        }
        if !(self.fixed_delta > 0.0 && self.fixed_delta.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "fixed_delta must be positive and finite, got {}",
                self.fixed_delta
            )));
        }
        if !(self.click_slop >= 0.0 && self.click_slop.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "click_slop must be finite and not negative, got {}",
                self.click_slop
            )));
        }
        Ok(())
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: RainConfig =
            ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, PrettyConfig::new())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let serialized = self.to_ron()?;
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut file = File::create(path).map_err(io_error)?;
        file.write_all(serialized.as_bytes()).map_err(io_error)
    }

    /// Loads the configuration at `path`, writing the defaults there first if
    /// the file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::default();
        config.save(path)?;
        info!("Wrote default rain configuration to {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.droplet_count, 100);
        assert_eq!(config.fixed_delta, 0.016);
        assert_eq!(config.fragment_style, FragmentStyle::Drizzle);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = RainConfig::from_ron("(droplet_count: 12, seed: Some(7))").unwrap();
        assert_eq!(config.droplet_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.size_max, DEFAULT_DROPLET_SIZE_MAX);
    }

    #[test]
    fn test_invalid_sizes_are_rejected() {
        let result = RainConfig::from_ron("(size_min: 0.2, size_max: 0.1)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = RainConfig::from_ron("(fixed_delta: 0.0)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let base = RainConfig::default();
        let broken = [
            RainConfig {
                spawn_extent: 3.0e38,
                ..base.clone()
            },
            RainConfig {
                spawn_extent: f32::INFINITY,
                ..base.clone()
            },
            RainConfig {
                size_max: f32::INFINITY,
                ..base.clone()
            },
            RainConfig {
                fixed_delta: f32::INFINITY,
                ..base.clone()
            },
            RainConfig {
                fixed_delta: f32::NAN,
                ..base.clone()
            },
            RainConfig {
                click_slop: f32::INFINITY,
                ..base.clone()
            },
        ];
        for config in broken {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "accepted {config:?}"
            );
        }

        let result = RainConfig::from_ron("(spawn_extent: 3.0e38)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let result = RainConfig::from_ron("(droplet_count: \"many\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rain.ron");

        let created = RainConfig::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, RainConfig::default());

        let mut edited = created.clone();
        edited.droplet_count = 3;
        edited.fragment_style = FragmentStyle::Burst;
        edited.save(&path).unwrap();

        let reloaded = RainConfig::load_or_create(&path).unwrap();
        assert_eq!(reloaded, edited);
    }

    #[test]
    fn test_missing_file_load_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RainConfig::load(&dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
