//! Configuration loading
//!
//! Reads `~/.config/hovertip/config.toml`. A missing file means defaults.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::*;

use crate::error::{HovertipError, Result};

const CONFIG_DIR: &str = "hovertip";
const CONFIG_FILE: &str = "config.toml";

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from the default location, falling back to defaults
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }

    match load_config_from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Load the config from an explicit path; errors are reported to the caller
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    parse_config_toml(&contents)
}

pub fn parse_config_toml(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| HovertipError::Config(e.to_string()))
}
