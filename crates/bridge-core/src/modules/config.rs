use std::fs;
use std::path::{Path, PathBuf};

use antigravity_bridge_types::{BridgeConfig, ConfigError};

use crate::error::AppResult;

const CONFIG_DIR: &str = "antigravity-bridge";
const CONFIG_FILE: &str = "config.json";

/// Default config location: `<config dir>/antigravity-bridge/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load and validate the bridge configuration.
///
/// A missing file is not an error: the defaults are returned so a fresh
/// install works without any setup.
pub fn load_config(path: &Path) -> AppResult<BridgeConfig> {
    if !path.exists() {
        tracing::debug!("[Config] {} not found, using defaults", path.display());
        return Ok(BridgeConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: BridgeConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    config.check()?;

    tracing::info!("[Config] Loaded configuration from {}", path.display());
    Ok(config)
}

/// Load from `path`, or from [`default_config_path`] when no path is given.
pub fn load_config_or_default(path: Option<&Path>) -> AppResult<BridgeConfig> {
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => load_config(&p),
        None => {
            tracing::warn!("[Config] No config directory available, using defaults");
            Ok(BridgeConfig::default())
        },
    }
}

/// Write `config` as pretty JSON, creating parent directories as needed.
pub fn save_config(path: &Path, config: &BridgeConfig) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    tracing::info!("[Config] Saved configuration to {}", path.display());
    Ok(())
}
