//! User configuration (config.yml)
//!
//! Lookup order for the file: an explicit `--config` path, `./config.yml`,
//! then `<config dir>/aesthetics/config.yml`. A missing file yields the
//! defaults; a malformed one is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregation::AggregationMode;
use crate::error::{AestheticsError, Result};
use crate::layout::DEFAULT_ROOT;

pub const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,

    /// Grouping shown by `decorations` when `--by` is not given
    #[serde(with = "mode_format")]
    pub decoration_aggregation_type: AggregationMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdcard_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            decoration_aggregation_type: AggregationMode::default(),
            sdcard_root: None,
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Path the configuration is read from and saved to
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            return local;
        }

        dirs::config_dir()
            .map(|dir| dir.join("aesthetics").join(CONFIG_FILE))
            .unwrap_or(local)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let yaml = std::fs::read_to_string(path).map_err(|e| AestheticsError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_yaml(&yaml).map_err(|e| AestheticsError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let write_error = |reason: String| AestheticsError::FileWriteFailed {
            path: path.display().to_string(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        std::fs::write(path, self.to_yaml()?).map_err(|e| write_error(e.to_string()))
    }

    /// SD card root: the command line wins, then the config, then the device default
    pub fn sdcard_root(&self, override_root: Option<&Path>) -> PathBuf {
        override_root
            .map(Path::to_path_buf)
            .or_else(|| self.sdcard_root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }

    /// Flip the aggregation type and return the new one
    pub fn cycle_aggregation_type(&mut self) -> AggregationMode {
        self.decoration_aggregation_type = self.decoration_aggregation_type.cycle();
        self.decoration_aggregation_type
    }
}

/// Accepts `console`/`directory` as well as the numeric `0`/`1`
mod mode_format {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::aggregation::AggregationMode;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Index(u8),
    }

    pub fn serialize<S: Serializer>(mode: &AggregationMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<AggregationMode, D::Error> {
        let text = match Raw::deserialize(deserializer)? {
            Raw::Name(name) => name,
            Raw::Index(index) => index.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
