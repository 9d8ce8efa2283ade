//! High-level plot types.
//!
//! Provides the calendar heatmap and its legend with builder APIs.

mod heatmap;
mod legend;

pub use heatmap::{BuiltHeatmap, CalendarHeatmap, Cell, DEFAULT_TITLE};
pub use legend::{Legend, Swatch, SWATCH_HEIGHT};
