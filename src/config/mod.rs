//! # Configuration Management Module
//!
//! Typed TOML configuration for the plugin: data directory, save cadence,
//! and logging. The database pool reads its own `database.toml` inside the
//! data directory (see [`crate::core::database`]); this file covers
//! everything else.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [plugin]
//! name = "Skylands"
//! data_dir = "./data"
//!
//! [save]
//! enabled = true
//! interval_minutes = 10
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::core::save_scheduler::SaveConfig;

/// Core plugin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,
    /// Directory holding the database file, its properties file, and
    /// anything else the plugin persists.
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub plugin: PluginConfig,
    #[serde(default)]
    pub save: SaveConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            plugin: PluginConfig {
                name: "Skylands".to_string(),
                data_dir: "./data".to_string(),
            },
            save: SaveConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("skylands.log".to_string()),
            },
        }
    }
}
