//! Configuration system for the heatmap renderer.
//!
//! Supports YAML configuration with precedence: CLI > ENV > file > defaults.
//!
//! ```yaml
//! source:
//!   url: https://example.org/global-temperature.json
//!   timeout_secs: 30
//! chart:
//!   width: 800
//!   height: 400
//!   padding: 60
//! output:
//!   path: heatmap.html
//!   format: html
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fetch::DEFAULT_URL;
use crate::output::OutputFormat;
use crate::plots::DEFAULT_TITLE;

/// Where the data comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Dataset URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { url: default_url(), timeout_secs: default_timeout_secs() }
    }
}

/// Chart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Space around the plot area.
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Cell width in pixels.
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,

    /// Cell height in pixels.
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,

    /// Legend length in pixels.
    #[serde(default = "default_legend_width")]
    pub legend_width: f64,

    /// Chart title.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    400
}
fn default_padding() -> u32 {
    60
}
fn default_cell_width() -> f64 {
    3.0
}
fn default_cell_height() -> f64 {
    23.0
}
fn default_legend_width() -> f64 {
    240.0
}
fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            legend_width: default_legend_width(),
            title: default_title(),
        }
    }
}

/// Output destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File to write.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Document format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("heatmap.html")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path(), format: OutputFormat::default() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Chart layout settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/climate-heatmap/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("climate-heatmap").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid
    /// values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Checks that the layout leaves room for a plot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the first bad key.
    pub fn validate(&self) -> Result<()> {
        let chart = &self.chart;
        let invalid = |key: &str, message: &str| {
            Err(Error::ConfigInvalid { key: key.to_string(), message: message.to_string() })
        };

        if chart.width == 0 {
            return invalid("chart.width", "must be positive");
        }
        if chart.height == 0 {
            return invalid("chart.height", "must be positive");
        }
        let p = f64::from(chart.padding);
        if p >= f64::from(chart.width) - p / 2.0 || p >= f64::from(chart.height) - p {
            return invalid("chart.padding", "leaves no room for the plot area");
        }
        // one pixel per month band at least
        if f64::from(chart.height) - 2.0 * p < 12.0 {
            return invalid("chart.height", "plot area is shorter than one pixel per month");
        }
        if !(chart.cell_width > 0.0) {
            return invalid("chart.cell_width", "must be positive");
        }
        if !(chart.cell_height > 0.0) {
            return invalid("chart.cell_height", "must be positive");
        }
        if !(chart.legend_width > 0.0) {
            return invalid("chart.legend_width", "must be positive");
        }
        if self.source.timeout_secs == 0 {
            return invalid("source.timeout_secs", "must be positive");
        }
        Ok(())
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }
}
