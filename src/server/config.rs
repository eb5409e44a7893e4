//! Service configuration
//!
//! Manages the listening port, read from and saved to a yaml settings
//! file in the service's config directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8643;

/// Config file name
const CONFIG_FILENAME: &str = "settings.yaml";

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listening port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServiceConfig {
    /// Load configuration from the config directory
    ///
    /// # Returns
    /// The configuration, or the default when the file is absent or
    /// unreadable
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the config directory
    pub fn save(&self, config_dir: &Path) -> Result<(), String> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&config_path, content).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Validate that a port is usable
    ///
    /// Ports below 1024 are privileged and rejected.
    pub fn validate_port(port: u16) -> Result<(), String> {
        if port < 1024 {
            return Err("Port must be >= 1024 (non-privileged ports)".to_string());
        }
        Ok(())
    }
}
