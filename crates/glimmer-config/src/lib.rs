//! Configuration file handling for glimmer.
//!
//! The configuration lives in `config.toml` under the platform config
//! directory. Every field is optional in the file; missing fields take their
//! defaults, and a missing file yields the default configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glimmer_core::AnimationSpeed;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of floating glyphs.
    pub element_count: i64,
    /// Fixed seed for reproducible layouts; random when absent.
    /// TOML integers are signed, so seeds above `i64::MAX` are rejected.
    pub seed: Option<u64>,
    pub speed: AnimationSpeed,
    /// Ease pointer parallax with a spring.
    pub pointer_smoothing: bool,
    /// Draw the ambient gradient orbs.
    pub show_ambient: bool,
    /// Assumed pixel width of a terminal cell.
    pub cell_width_px: f32,
    /// Assumed pixel height of a terminal cell.
    pub cell_height_px: f32,
    /// Pixels scrolled per wheel notch or arrow key.
    pub scroll_step_px: f32,
    /// Length of the virtual page below the viewport, in pixels.
    pub max_scroll_px: f32,
    /// Target time between frames, in milliseconds.
    pub frame_interval_ms: u64,
    /// Text shown above the background.
    pub greeting: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            element_count: 100,
            seed: None,
            speed: AnimationSpeed::Medium,
            pointer_smoothing: true,
            show_ambient: true,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            scroll_step_px: 40.0,
            max_scroll_px: 2000.0,
            frame_interval_ms: 33,
            greeting: "You make the world a little brighter just by being in it.".to_string(),
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "glimmer")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Reject values the background cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.element_count < 0 {
            return Err(ConfigError::Invalid {
                field: "element_count",
                reason: format!("must be non-negative, got {}", self.element_count),
            });
        }
        for (field, value) in [
            ("cell_width_px", self.cell_width_px),
            ("cell_height_px", self.cell_height_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        for (field, value) in [
            ("scroll_step_px", self.scroll_step_px),
            ("max_scroll_px", self.max_scroll_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        if let Some(seed) = self.seed
            && i64::try_from(seed).is_err()
        {
            return Err(ConfigError::Invalid {
                field: "seed",
                reason: format!("must be at most {}, got {seed}", i64::MAX),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "element_count = 40\nseed = 9\nspeed = \"slow\"\n");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.element_count, 40);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.speed, AnimationSpeed::Slow);
        assert!(config.show_ambient);
    }

    #[test]
    fn test_negative_count_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "element_count = -1\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "element_count",
                ..
            }
        ));
    }

    #[test]
    fn test_fractional_count_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "element_count = 2.5\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_cell_width_rejected() {
        let config = Config {
            cell_width_px: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = Config {
            seed: Some(1234),
            greeting: "hello".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_seed_beyond_toml_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            seed: Some(u64::MAX),
            ..Config::default()
        };
        let err = config.save_to(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "seed", .. }));
        assert!(!path.exists());

        let config = Config {
            seed: Some(i64::MAX as u64),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
