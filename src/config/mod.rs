//! Configuration module
//!
//! Handles loading and saving of exam-countdown.toml configuration files.
//! Defines Config, Storage, Remote, and Display types.

mod types;

#[allow(unused_imports)]
pub use types::{Config, Display, Remote, Storage};

use crate::error::{CountdownError, Result};
use std::fs;
use std::path::Path;

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./exam-countdown.toml";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        CountdownError::Config(format!(
            "Cannot read config from '{}': {}. Run 'exam-countdown config init' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Load `path` when given, otherwise the default file if it exists
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| CountdownError::Config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}
