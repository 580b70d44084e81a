//! Dashboard configuration file

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::{info, warn};
use dv_core::AppSettings;

use super::null_handling::NullConfig;
use crate::ConfigError;

/// Environment variable holding the path of the JSON config file
pub const CONFIG_ENV_VAR: &str = "DATAVIS_CONFIG";

/// Header names of the columns the loader reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub year: String,
    pub category: String,
    pub disposition: String,
    /// Optional column; ignored when absent from the file
    pub precinct: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            year: "year_received".to_string(),
            category: "fado_type".to_string(),
            disposition: "board_disposition".to_string(),
            precinct: Some("precinct".to_string()),
        }
    }
}

impl ColumnMapping {
    /// Required column names
    pub fn required(&self) -> [&str; 3] {
        [self.year.as_str(), self.category.as_str(), self.disposition.as_str()]
    }
}

/// How rows are read from a CSV file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub columns: ColumnMapping,
    pub null_config: NullConfig,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset opened at startup when no path is given on the command line
    pub data_path: Option<PathBuf>,
    pub loader: LoaderConfig,
    pub settings: AppSettings,
}

impl DashboardConfig {
    /// Read a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`]. A missing variable gives
    /// the defaults; an unreadable or invalid file is logged and also gives
    /// the defaults.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded dashboard config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring dashboard config: {}", e);
                Self::default()
            }
        }
    }
}
