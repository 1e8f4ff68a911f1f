//! Configuration module

use crate::{Error, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User-adjustable defaults, stored as TOML in the platform config
/// directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default split size in MB for pack operations (0 = no splitting)
    pub default_size_limit_mb: u64,
    /// Extract into a subfolder named after the archive by default
    pub create_subfolder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_size_limit_mb: 0,
            create_subfolder: false,
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| Error::Config("unable to determine config directory".to_string()))?;

        let dir = config_dir.join("splitzip");
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        Ok(dir.join("config.toml"))
    }

    /// Load configuration from file, creating a default one if missing
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;

        fs::write(&path, contents)?;
        Ok(())
    }

    /// Load configuration or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Default split size converted to bytes, `None` when splitting is off
    pub fn default_size_limit_bytes(&self) -> Option<u64> {
        match self.default_size_limit_mb {
            0 => None,
            mb => Some(mb * 1024 * 1024),
        }
    }
}
