//! Color legend for threshold-classified heatmaps.
//!
//! One swatch per palette color, placed on a linear scale over the observed
//! temperature range. Swatch width is proportional to the bin's span, so the
//! swatches tile the legend exactly.

use crate::axis::{value_axis, Axis};
use crate::color::Rgba;
use crate::error::Result;
use crate::output::{Attributes, SvgElement};
use crate::scale::{LinearScale, Scale, ThresholdScale};

/// Height of a swatch, also used as the legend tick length.
pub const SWATCH_HEIGHT: f64 = 13.0;

/// One colored bin of the legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    /// Bin color.
    pub color: Rgba,
    /// Lower temperature bound of the bin (inclusive).
    pub from: f64,
    /// Upper temperature bound of the bin (exclusive, except for the last).
    pub to: f64,
    /// Left edge relative to the legend origin.
    pub x: f64,
    /// Width in pixels.
    pub width: f64,
}

/// Legend layout.
#[derive(Debug, Clone)]
pub struct Legend {
    scale: LinearScale,
    swatches: Vec<Swatch>,
    axis: Axis,
}

impl Legend {
    /// Lay out a legend of `width` pixels for the given color classification
    /// over `domain` (coldest, warmest).
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is empty.
    pub fn new(colors: &ThresholdScale<Rgba>, domain: (f64, f64), width: f64) -> Result<Self> {
        let scale = LinearScale::new(domain, (0.0, width))?;

        let swatches = colors
            .outputs()
            .iter()
            .enumerate()
            .filter_map(|(i, color)| {
                let (lower, upper) = colors.invert_extent(i)?;
                let from = lower.unwrap_or(domain.0);
                let to = upper.unwrap_or(domain.1);
                let x = scale.scale(from);
                Some(Swatch { color: *color, from, to, x, width: scale.scale(to) - x })
            })
            .collect();

        let axis = value_axis(&scale, colors.boundaries(), SWATCH_HEIGHT).without_domain();

        Ok(Self { scale, swatches, axis })
    }

    /// Swatches, coolest first.
    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Sum of all swatch widths.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.swatches.iter().map(|s| s.width).sum()
    }

    /// Temperature-to-pixel scale of the legend.
    #[must_use]
    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    /// Tick axis drawn over the swatches.
    #[must_use]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Render as an SVG group: swatches first, ticks on top.
    #[must_use]
    pub fn to_element(&self, attrs: Attributes) -> SvgElement {
        let mut children: Vec<SvgElement> = self
            .swatches
            .iter()
            .map(|s| SvgElement::Rect {
                x: s.x,
                y: 0.0,
                width: s.width,
                height: SWATCH_HEIGHT,
                fill: s.color,
                attrs: Attributes::new()
                    .class("swatch")
                    .data("from", s.from)
                    .data("to", s.to),
            })
            .collect();
        children.push(self.axis.to_element(Attributes::new()));

        SvgElement::Group { attrs, children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use approx::assert_relative_eq;

    fn legend(min: f64, max: f64) -> Legend {
        let colors =
            ThresholdScale::equal_width(min, max, Palette::spectral_reversed().colors().to_vec())
                .unwrap();
        Legend::new(&colors, (min, max), 240.0).unwrap()
    }

    #[test]
    fn test_swatch_count_matches_palette() {
        assert_eq!(legend(1.684, 13.888).swatches().len(), 9);
    }

    #[test]
    fn test_swatches_tile_legend() {
        let legend = legend(1.684, 13.888);
        assert_relative_eq!(legend.total_width(), 240.0, epsilon = 1e-9);

        let swatches = legend.swatches();
        assert_relative_eq!(swatches[0].x, 0.0);
        for pair in swatches.windows(2) {
            assert_relative_eq!(pair[0].x + pair[0].width, pair[1].x, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_swatch_colors_in_bin_order() {
        let legend = legend(0.0, 9.0);
        let palette = Palette::spectral_reversed();
        for (swatch, color) in legend.swatches().iter().zip(palette.colors()) {
            assert_eq!(swatch.color, *color);
        }
        assert_relative_eq!(legend.swatches()[0].from, 0.0);
        assert_relative_eq!(legend.swatches()[8].to, 9.0);
    }

    #[test]
    fn test_axis_ticks_at_boundaries() {
        let legend = legend(0.0, 9.0);
        let ticks = legend.axis().tick_list();
        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0].label, "1.0");
        assert_relative_eq!(ticks[0].position, 240.0 / 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_legend_element() {
        let element = legend(0.0, 9.0).to_element(Attributes::new().id("legend"));
        let svg = crate::output::SvgEncoder::new(800, 400).group(Attributes::new(), vec![element]).render();
        assert_eq!(svg.matches(r#"class="swatch""#).count(), 9);
        assert!(svg.contains(r#"id="legend""#));
        assert!(!svg.contains(r#"class="domain""#));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let colors = ThresholdScale::new(vec![], vec![Rgba::BLACK]).unwrap();
        assert!(Legend::new(&colors, (1.0, 1.0), 240.0).is_err());
    }
}
