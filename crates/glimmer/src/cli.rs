//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glimmer_config::Config;
use glimmer_core::AnimationSpeed;

#[derive(Debug, Parser)]
#[command(version, about = "An ambient floating-glyph greeting for the terminal")]
pub struct Args {
    /// Configuration file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible glyph layout.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of floating glyphs.
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Animation speed.
    #[arg(long, value_enum)]
    pub speed: Option<SpeedArg>,

    /// Hide the ambient gradient orbs.
    #[arg(long)]
    pub no_ambient: bool,

    /// Snap parallax to the pointer instead of easing toward it.
    #[arg(long)]
    pub no_smoothing: bool,

    /// Write logs to this file (also read from `GLIMMER_LOG_FILE`).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Save the effective configuration before starting.
    #[arg(long)]
    pub save_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeedArg {
    Slow,
    Medium,
    Fast,
}

impl From<SpeedArg> for AnimationSpeed {
    fn from(speed: SpeedArg) -> Self {
        match speed {
            SpeedArg::Slow => AnimationSpeed::Slow,
            SpeedArg::Medium => AnimationSpeed::Medium,
            SpeedArg::Fast => AnimationSpeed::Fast,
        }
    }
}

impl Args {
    /// Overlay command line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(count) = self.count {
            config.element_count = count;
        }
        if let Some(speed) = self.speed {
            config.speed = speed.into();
        }
        if self.no_ambient {
            config.show_ambient = false;
        }
        if self.no_smoothing {
            config.pointer_smoothing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let args = Args::parse_from([
            "glimmer",
            "--seed",
            "5",
            "--count",
            "12",
            "--speed",
            "fast",
            "--no-ambient",
        ]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.element_count, 12);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert!(!config.show_ambient);
        assert!(config.pointer_smoothing);
    }

    #[test]
    fn test_no_args_keeps_config() {
        let args = Args::parse_from(["glimmer"]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_negative_count_parses() {
        let args = Args::parse_from(["glimmer", "--count", "-1"]);
        assert_eq!(args.count, Some(-1));
    }
}
