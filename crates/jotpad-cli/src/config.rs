//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use jotpad_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "jotpad";

/// Environment variable overriding the notes directory.
pub const DATA_DIR_ENV: &str = "JOTPAD_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    /// Directory holding the note collection
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Editor command used by `add` and `edit`
    #[serde(default)]
    pub editor: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            data_dir: None,
            editor: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    pub fn editor(&self) -> Option<String> {
        normalize_text_option(self.editor.clone())
    }

    fn normalize(&mut self) {
        self.editor = normalize_text_option(self.editor.take());
        self.data_dir = self
            .data_dir
            .take()
            .filter(|dir| !dir.as_os_str().is_empty());
        if self.version == 0 {
            self.version = default_config_version();
        }
    }
}

/// Resolve the notes directory: flag, then environment, then config file,
/// then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &CliConfig) -> PathBuf {
    resolve_data_dir_from(flag, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from), config)
}

pub fn resolve_data_dir_from(
    flag: Option<PathBuf>,
    env_value: Option<PathBuf>,
    config: &CliConfig,
) -> PathBuf {
    flag.or_else(|| env_value.filter(|dir| !dir.as_os_str().is_empty()))
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(default_data_dir)
}
