//! Application configuration
//!
//! Loaded from an optional TOML file; every field has a default so an absent
//! file or a partial one both work.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Month counted by the "this month" tile, as `YYYY-MM`. Defaults to the
    /// current UTC month.
    #[serde(default)]
    pub current_month: Option<String>,

    #[serde(default)]
    pub import: ImportSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

/// Where imported records are placed on the map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportSettings {
    #[serde(default = "default_origin_lat")]
    pub origin_lat: f64,

    #[serde(default = "default_origin_lng")]
    pub origin_lng: f64,

    /// Width of the random offset added to each axis.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

fn default_origin_lat() -> f64 {
    40.71
}
fn default_origin_lng() -> f64 {
    -74.01
}
fn default_jitter() -> f64 {
    0.1
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            origin_lat: default_origin_lat(),
            origin_lng: default_origin_lng(),
            jitter: default_jitter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
}

fn default_export_path() -> PathBuf {
    PathBuf::from("crime_records.csv")
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}

impl AppConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn current_month(&self) -> String {
        self.current_month
            .clone()
            .unwrap_or_else(|| Utc::now().format("%Y-%m").to_string())
    }
}
