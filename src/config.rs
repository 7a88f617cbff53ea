//! Runner configuration.
//!
//! Read from an optional YAML file; every key may be omitted:
//!
//! ```yaml
//! gold_dir: tests/gold
//! output_dir: build/test
//! use_colors: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use termcolor::ColorChoice;

use crate::errors::{MuteError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Where recorded gold files live.
    pub gold_dir: PathBuf,
    /// Where test outputs are written and looked up.
    pub output_dir: PathBuf,
    pub use_colors: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gold_dir: PathBuf::from("tests/gold"),
            output_dir: PathBuf::from("build/test"),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl RunnerConfig {
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| MuteError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MuteError::io("read", path, e))?;
        Self::from_yaml(path, &text)
    }

    /// Loads `path` if given, otherwise uses the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn color_choice(&self) -> ColorChoice {
        if self.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = RunnerConfig::from_yaml(Path::new("mute.yaml"), "gold_dir: gold\n").unwrap();
        assert_eq!(config.gold_dir, PathBuf::from("gold"));
        assert_eq!(config.output_dir, PathBuf::from("build/test"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RunnerConfig::from_yaml(Path::new("mute.yaml"), "gold: x\n").unwrap_err();
        assert!(matches!(err, MuteError::Config { .. }));
    }

    #[test]
    fn colors_can_be_disabled() {
        let config = RunnerConfig::from_yaml(Path::new("mute.yaml"), "use_colors: false").unwrap();
        assert_eq!(config.color_choice(), ColorChoice::Never);
    }
}
