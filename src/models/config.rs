use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::services::sort::{SortDirection, SortField, SortState};
use crate::utils::error::AppResult;

const CONFIG_FILE: &str = "config.toml";

/// Registry screen defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub default_sort_field: SortField,
    pub default_sort_direction: SortDirection,
    /// Show households grouped by family card instead of the flat table
    pub group_households: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            default_sort_field: SortField::FullName,
            default_sort_direction: SortDirection::Asc,
            group_households: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// tracing filter directive, e.g. "info" or "halowarga=debug"
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Engine configuration, read from `config.toml`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub registry: RegistrySettings,
    pub logging: LoggingSettings,
}

impl EngineConfig {
    /// Platform config directory, falling back to the working directory
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("id", "halowarga", "HaloWarga")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Load from the default location; any problem yields the defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Sort state the registry table starts with
    pub fn initial_sort(&self) -> SortState {
        SortState::new(
            self.registry.default_sort_field,
            self.registry.default_sort_direction,
        )
    }
}
