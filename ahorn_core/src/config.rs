//! Site configuration file support.
//!
//! This module reads the site configuration from a TOML file. Every field
//! has a default, so an empty file (or no file at all) is a valid
//! configuration.
//!
//! ```toml
//! [catalog]
//! path = "datasets"
//! base_url = "https://ahorn.rwth-aachen.de/"
//!
//! [table]
//! min_gap = 10
//!
//! [charts]
//! min_unit = "day"
//! max_unit = "year"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};
use crate::time::buckets::{TimeUnit, UnitRange};
use crate::transformations::range_selector::DEFAULT_MIN_GAP;

/// Name of the configuration file searched by [`SiteConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "ahorn.toml";

pub const DEFAULT_BASE_URL: &str = "https://ahorn.rwth-aachen.de/";

/// Site configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub table: TableSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

/// Where the datasheets live and how attachment links are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Dataset table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Minimum distance between the two node-range handles.
    #[serde(default = "default_min_gap")]
    pub min_gap: u64,
}

/// Temporal chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_min_unit")]
    pub min_unit: TimeUnit,
    #[serde(default = "default_max_unit")]
    pub max_unit: TimeUnit,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("datasets")
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_min_gap() -> u64 {
    DEFAULT_MIN_GAP
}

fn default_min_unit() -> TimeUnit {
    TimeUnit::Hour
}

fn default_max_unit() -> TimeUnit {
    TimeUnit::Year
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            base_url: default_base_url(),
        }
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            min_gap: default_min_gap(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            min_unit: default_min_unit(),
            max_unit: default_max_unit(),
        }
    }
}

impl SiteConfig {
    /// Load site configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` if successful
    /// * `Err(CatalogError::Configuration)` if the file cannot be read, parsed
    ///   or describes an impossible unit range
    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse site configuration from TOML text.
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(|e| {
            CatalogError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.unit_range()?;
        Ok(config)
    }

    /// Load site configuration from the default location.
    ///
    /// Searches for `ahorn.toml` in:
    /// 1. Current directory
    /// 2. Parent directory
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` if found and parsed successfully
    /// * `Err(CatalogError::Configuration)` if no config file found or parse error
    pub fn from_default_location() -> CatalogResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Using site configuration {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(CatalogError::Configuration(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Load the configuration at `path` if given, else from the default
    /// location, else fall back to defaults.
    pub fn load(path: Option<&Path>) -> CatalogResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::from_default_location() {
                Ok(config) => Ok(config),
                Err(e) => {
                    log::debug!("{}; using default site configuration", e);
                    Ok(Self::default())
                }
            },
        }
    }

    /// Units the temporal charts may aggregate by.
    pub fn unit_range(&self) -> CatalogResult<UnitRange> {
        UnitRange::new(self.charts.min_unit, self.charts.max_unit)
    }
}
