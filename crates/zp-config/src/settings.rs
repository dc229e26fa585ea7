use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Default config directory, relative to the game directory
pub const DEFAULT_CONFIG_DIR: &str = "addons/sourcemod/configs/zombieplague";

/// Host settings, persisted as TOML
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_modules: Option<String>,
}

impl Settings {
    pub fn path() -> PathBuf {
        // Honor explicit override via ZP_CONFIG for tests / isolated runs.
        if let Ok(env_path) = std::env::var("ZP_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir()
            .map_or_else(|| PathBuf::from(".config"), |h| h.join(".config"))
            .join("zp")
            .join("zp.toml");

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zp")
            .join("zp.toml");

        // A pointer file next to the default location may redirect to another settings file
        if let Some(pointer) = Self::pointer_path(&default) {
            if let Ok(contents) = fs::read_to_string(&pointer) {
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
        }

        default
    }

    /// Location of the `.zp_config_path` pointer file for a settings path
    pub fn pointer_path(settings_path: &Path) -> Option<PathBuf> {
        settings_path
            .parent()
            .map(|parent| parent.join(".zp_config_path"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    /// Load settings from a specific path, returning defaults if the file doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "game-dir" => self.game_dir.clone(),
            "config-dir" => self.config_dir.clone(),
            "downloads-path" => self.downloads_path.clone(),
            "log-modules" => self.log_modules.clone(),
            _ => None,
        }
    }

    /// Set a key, returning false if the key is unknown
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "game-dir" => self.game_dir = Some(value),
            "config-dir" => self.config_dir = Some(value),
            "downloads-path" => self.downloads_path = Some(value),
            "log-modules" => self.log_modules = Some(value),
            _ => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.game_dir.is_none()
            && self.config_dir.is_none()
            && self.downloads_path.is_none()
            && self.log_modules.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        [
            ("game-dir", &self.game_dir),
            ("config-dir", &self.config_dir),
            ("downloads-path", &self.downloads_path),
            ("log-modules", &self.log_modules),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }

    /// Root directory every manifest path resolves against
    pub fn game_dir(&self) -> PathBuf {
        self.game_dir
            .as_deref()
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
    }

    /// Directory holding the config files, relative ones resolve against the game directory
    pub fn config_dir(&self) -> PathBuf {
        let dir = self
            .config_dir
            .as_deref()
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR), PathBuf::from);
        if dir.is_absolute() {
            dir
        } else {
            self.game_dir().join(dir)
        }
    }

    /// Module names listed in `log-modules`, lowercased
    pub fn log_modules(&self) -> Vec<String> {
        self.log_modules
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect()
    }
}
