//! Configuration management.
//!
//! Configuration is read from `~/.config/gleaner/config.toml` at startup
//! (or a path given with `--config`). If the default file doesn't exist, a
//! commented one is created. Missing fields fall back to defaults.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::{GleanerError, Result};
use crate::collector::CollectorConfig;

/// Browser-level options for the render surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Run the browser without a window (default: true).
    ///
    /// Interactive login against a challenge page may need `--headed`.
    pub headless: bool,

    /// User agent override; `None` keeps the browser default.
    pub user_agent: Option<String>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub surface: SurfaceConfig,
    pub collector: CollectorConfig,
}

impl Config {
    /// Load configuration from an explicit path, or the default location.
    ///
    /// The default file is created (with comments) on first run; an
    /// explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_config_path()?;
                if !path.exists() {
                    Self::create_default_config(&path)?;
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GleanerError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            GleanerError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Default config file path: `~/.config/gleaner/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GleanerError::Config("could not find config directory".into()))?;
        Ok(config_dir.join("gleaner").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(Self::default_config_content().as_bytes())?;
        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Gleaner configuration
#
# Every field is optional; missing fields use the built-in defaults.

[surface]
# Run the browser without a window. Use `--headed` (or set this to false)
# when login hits an interactive challenge.
headless = true

[collector]
# Ceiling on scroll-and-settle cycles over the comment feed.
max_cycles = 50
# Consecutive no-progress cycles before the run is considered stalled.
stall_threshold = 3
# Pixels scrolled forward per cycle.
scroll_delta_px = 1500
# Pause after each scroll, in milliseconds.
settle_ms = 3000
# Pause after the post page first loads, in milliseconds.
initial_settle_ms = 5000
# Upper bound of the per-cycle item index scan.
max_index = 500
"##
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.surface.headless);
        assert!(config.surface.user_agent.is_some());
        assert_eq!(config.collector.max_cycles, 50);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[collector]\nmax_cycles = 7\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.collector.max_cycles, 7);
        assert_eq!(config.collector.stall_threshold, 3);
        assert!(config.surface.headless);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_default_content_parses() {
        let config: Config = toml::from_str(&Config::default_config_content()).unwrap();
        assert_eq!(config.collector.max_cycles, 50);
        assert!(config.surface.headless);
    }
}
