//! # climate-heatmap
//!
//! Calendar heatmap of monthly global land-surface temperature.
//!
//! The pipeline is linear: load the dataset (HTTP or file), derive scales,
//! lay out one cell per record plus axes and a legend, then encode the chart
//! as SVG or as an HTML page with a hover tooltip.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use climate_heatmap::prelude::*;
//!
//! let fetcher = Fetcher::new(DEFAULT_TIMEOUT)?;
//! let dataset = fetcher.fetch(DEFAULT_URL).await?;
//!
//! let chart = CalendarHeatmap::new(&dataset).build()?;
//! HtmlExporter::new(chart.title(), &chart.to_svg()).write_to_file("heatmap.html")?;
//! ```
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Brewer, C. A. (2003). "A Transition in Improving Maps: The ColorBrewer Example."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the bin palette.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Axis ticks and rendering.
pub mod axis;

// ============================================================================
// Data Modules
// ============================================================================

/// Dataset model and validation.
pub mod dataset;

/// Loading the dataset over HTTP or from disk.
pub mod fetch;

// ============================================================================
// Visualization Modules
// ============================================================================

/// High-level plot types (calendar heatmap, legend).
pub mod plots;

/// Output encoders (SVG, HTML).
pub mod output;

// ============================================================================
// Configuration & Errors
// ============================================================================

/// YAML configuration.
pub mod config;

/// Error types for climate-heatmap operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use climate_heatmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Palette, Rgba};
    pub use crate::config::Config;
    pub use crate::dataset::{Dataset, MonthRecord};
    pub use crate::error::{Error, Result};
    pub use crate::fetch::{Fetcher, Source, DEFAULT_TIMEOUT, DEFAULT_URL};
    pub use crate::output::{HtmlExporter, OutputFormat, SvgEncoder};
    pub use crate::plots::{BuiltHeatmap, CalendarHeatmap, Cell, Legend, Swatch};
    pub use crate::scale::{BandScale, LinearScale, Scale, ThresholdScale, TimeScale};
}
