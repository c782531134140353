//! Application configuration loaded from config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scheduling::DEFAULT_DAILY_CAPACITY;
use crate::study_log::DailyGoal;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// New items handed out per deck per day
    pub daily_new_words: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            daily_new_words: DEFAULT_DAILY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file, relative to the data directory unless absolute
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("words.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scheduling: SchedulingConfig,
    pub goals: DailyGoal,
    pub catalog: CatalogConfig,
}

impl Config {
    /// Load from a TOML file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scheduling.daily_new_words == 0 {
            return Err(ConfigError::Validation(
                "scheduling.daily_new_words must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the catalog path against the data directory
    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        if self.catalog.path.is_absolute() {
            self.catalog.path.clone()
        } else {
            data_dir.join(&self.catalog.path)
        }
    }
}
