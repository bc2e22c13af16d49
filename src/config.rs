use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{RainmapError, Result};

/// Artifact format produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Self-contained HTML page with the embedded figure
    Html,
    /// Raw figure document as JSON
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Measurement CSV with `country` and `avg_measurement` columns
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// Appearance of the rendered choropleth.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub colorbar_title: String,
    pub colorscale: String,
    pub marker_line_color: String,
    pub show_coastlines: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("2023_rainfall.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("rainfall_map.html"),
            format: OutputFormat::Html,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Rainfall MM 2023".to_string(),
            colorbar_title: "Rainfall (MM) P.A.".to_string(),
            colorscale: "Viridis".to_string(),
            marker_line_color: "white".to_string(),
            show_coastlines: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Without an explicit path the default `config.toml` is used and a
    /// missing file falls back to built-in defaults. An explicitly given
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new("config.toml"));

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if !explicit && e.kind() == ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(RainmapError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
