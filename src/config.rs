//! Application Configuration
//! Optional `dashboard.json` overrides on top of built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dashboard settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset to load at startup.
    pub data_path: PathBuf,
    /// Decorative image shown above the dashboard.
    pub image_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Informational note shown under the error message.
    pub footer_note: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("game_type.csv"),
            image_path: PathBuf::from("game_image.png"),
            window_title: "Game Cultural Fit Analysis".to_string(),
            window_size: [1400.0, 900.0],
            min_window_size: [1000.0, 650.0],
            footer_note: "built by dw".to_string(),
        }
    }
}

impl AppConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `dashboard.json` from the working directory, falling back to
    /// defaults when it cannot be used.
    pub fn load() -> Self {
        match Self::from_path(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", CONFIG_FILE, e);
                Self::default()
            }
        }
    }
}
