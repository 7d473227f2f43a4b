//! Configuration loading from the file system

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::{CONFIG_DIRECTORY, CONFIG_FILE_NAME};
use super::types::EngineConfig;
use crate::error::{Result, ShortcutError};

/// Default config location: ~/.shortcut-engine/config.json
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CONFIG_DIRECTORY)
        .join(CONFIG_FILE_NAME)
}

/// Read and parse a config file.
pub fn try_load_config(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path).map_err(|source| ShortcutError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load configuration, falling back to defaults.
///
/// Returns EngineConfig::default() if the file is missing or invalid.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> EngineConfig {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return EngineConfig::default();
    }

    match try_load_config(path) {
        Ok(config) => {
            info!(?config, "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            EngineConfig::default()
        }
    }
}
