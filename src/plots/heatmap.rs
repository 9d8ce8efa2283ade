//! Calendar heatmap of monthly temperatures.
//!
//! Years run along the horizontal axis and months down the vertical one;
//! each record becomes one narrow cell colored by the equal-width threshold
//! bin its absolute temperature falls in.
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Brewer, C. A. (2003). ColorBrewer diverging schemes.

use tracing::{debug, warn};

use crate::axis::{month_axis, year_axis, Axis};
use crate::color::{Palette, Rgba};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::output::{Attributes, SvgElement, SvgEncoder, TextAnchor};
use crate::plots::legend::Legend;
use crate::scale::{BandScale, Scale, ThresholdScale, TimeScale};

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Monthly Global Land-Surface Temperature";

/// Number of month bands.
const MONTHS: usize = 12;

/// Requested number of year ticks.
const YEAR_TICKS: usize = 10;

/// Builder for the calendar heatmap.
#[derive(Debug, Clone)]
pub struct CalendarHeatmap<'a> {
    /// Data to plot.
    dataset: &'a Dataset,
    /// Output width in pixels.
    width: u32,
    /// Output height in pixels.
    height: u32,
    /// Space around the plot area.
    padding: u32,
    /// Cell width in pixels.
    cell_width: f64,
    /// Cell height in pixels.
    cell_height: f64,
    /// Legend length in pixels.
    legend_width: f64,
    /// Chart title.
    title: String,
    /// Bin colors, coolest first.
    palette: Palette,
}

impl<'a> CalendarHeatmap<'a> {
    /// Create a builder with the default layout (800 x 400, padding 60,
    /// 3 x 23 cells, 240 px legend).
    #[must_use]
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            width: 800,
            height: 400,
            padding: 60,
            cell_width: 3.0,
            cell_height: 23.0,
            legend_width: 240.0,
            title: DEFAULT_TITLE.to_string(),
            palette: Palette::default(),
        }
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the padding around the plot area.
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the size of each cell.
    #[must_use]
    pub fn cell_size(mut self, width: f64, height: f64) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Set the legend length.
    #[must_use]
    pub fn legend_width(mut self, width: f64) -> Self {
        self.legend_width = width;
        self
    }

    /// Set the chart title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the bin colors.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Compute scales, cells, axes and legend.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset is invalid, the dimensions leave no
    /// plot area, or the palette is empty.
    pub fn build(self) -> Result<BuiltHeatmap> {
        self.dataset.validate()?;

        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let p = f64::from(self.padding);
        // at least one pixel per month band
        if p >= w - p / 2.0 || h - 2.0 * p < MONTHS as f64 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
                padding: self.padding,
            });
        }
        if self.palette.is_empty() {
            return Err(Error::InvalidColor("palette is empty".to_string()));
        }

        let (first_year, last_year) = self.dataset.year_extent().ok_or(Error::EmptyData)?;
        let x_scale = TimeScale::for_years(first_year, last_year, (p, w - p / 2.0))?;
        let y_scale = BandScale::new(MONTHS, (p, h - p))?;

        let (min, max) = self.dataset.temperature_extent().ok_or(Error::EmptyData)?;
        // all values equal: widen so the bins stay ordered
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            warn!(temperature = min, "all temperatures are equal, widening color domain");
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let color_scale = ThresholdScale::equal_width(min, max, self.palette.colors().to_vec())?;
        debug!(
            min,
            max,
            boundaries = ?color_scale.boundaries(),
            "derived temperature thresholds"
        );

        let cells = self
            .dataset
            .records()
            .iter()
            .map(|record| -> Result<Cell> {
                let temperature = self.dataset.temperature(record);
                let month_index = record.month_index();
                let y = y_scale.position(month_index).ok_or(Error::InvalidMonth {
                    year: record.year,
                    month: record.month,
                })?;
                Ok(Cell {
                    year: record.year,
                    month_index,
                    temperature,
                    x: x_scale.scale_year(record.year)?,
                    y,
                    width: self.cell_width,
                    height: self.cell_height,
                    color: color_scale.scale(temperature),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let x_axis = year_axis(&x_scale, first_year, last_year, YEAR_TICKS)?;
        let y_axis = month_axis(&y_scale);
        let legend = Legend::new(&color_scale, (min, max), self.legend_width)?;

        let description = format!(
            "{first_year} - {last_year}: base temperature {}°C",
            self.dataset.base_temperature()
        );
        debug!(cells = cells.len(), %description, "heatmap laid out");

        Ok(BuiltHeatmap {
            width: self.width,
            height: self.height,
            padding: p,
            title: self.title,
            description,
            x_scale,
            y_scale,
            color_scale,
            cells,
            x_axis,
            y_axis,
            legend,
        })
    }
}

/// One rendered mark, bound to exactly one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Record year.
    pub year: i32,
    /// Zero-based month.
    pub month_index: usize,
    /// Absolute temperature (base + variance).
    pub temperature: f64,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Threshold color.
    pub color: Rgba,
}

/// A laid-out heatmap, ready to encode.
#[derive(Debug, Clone)]
pub struct BuiltHeatmap {
    width: u32,
    height: u32,
    padding: f64,
    title: String,
    description: String,
    x_scale: TimeScale,
    y_scale: BandScale,
    color_scale: ThresholdScale<Rgba>,
    cells: Vec<Cell>,
    x_axis: Axis,
    y_axis: Axis,
    legend: Legend,
}

impl BuiltHeatmap {
    /// Cells in record order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Legend layout.
    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Temperature-to-color classification.
    #[must_use]
    pub fn color_scale(&self) -> &ThresholdScale<Rgba> {
        &self.color_scale
    }

    /// Year-to-x scale.
    #[must_use]
    pub fn x_scale(&self) -> &TimeScale {
        &self.x_scale
    }

    /// Month-to-y scale.
    #[must_use]
    pub fn y_scale(&self) -> &BandScale {
        &self.y_scale
    }

    /// Horizontal axis.
    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Vertical axis.
    #[must_use]
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Chart title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Subtitle: year span and base temperature.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Output size.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Encode as SVG.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let p = self.padding;

        let mut svg = SvgEncoder::new(self.width, self.height).responsive(true);

        for cell in &self.cells {
            svg = svg.rect_with(
                cell.x,
                cell.y,
                cell.width,
                cell.height,
                cell.color,
                Attributes::new()
                    .class("cell")
                    .data("month", cell.month_index)
                    .data("year", cell.year)
                    .data("temp", cell.temperature),
            );
        }

        let heading = vec![
            SvgElement::Text {
                x: 0.0,
                y: 0.0,
                text: self.title.clone(),
                font_size: 18.0,
                fill: Rgba::BLACK,
                anchor: TextAnchor::Middle,
                attrs: Attributes::new().id("title"),
            },
            SvgElement::Text {
                x: 0.0,
                y: 0.0,
                text: self.description.clone(),
                font_size: 12.0,
                fill: Rgba::BLACK,
                anchor: TextAnchor::Middle,
                attrs: Attributes::new().id("description").set("dy", "1.5em"),
            },
        ];

        svg.group(Attributes::new().translate(w / 2.0, p / 2.0), heading)
            .group(
                Attributes::new(),
                vec![self.x_axis.to_element(Attributes::new().id("x-axis").translate(0.0, h - p))],
            )
            .group(
                Attributes::new(),
                vec![self.y_axis.to_element(Attributes::new().id("y-axis").translate(p, 0.0))],
            )
            .group(
                Attributes::new(),
                vec![self
                    .legend
                    .to_element(Attributes::new().id("legend").translate(p * 2.0, h - p / 2.0))],
            )
    }
}
