//! Axis tick generation and rendering.
//!
//! Ticks follow the usual "nice number" rule: the step is the power of ten
//! times 1, 2 or 5 that best divides the domain into the requested count.
//! Rendered axes mirror the common SVG axis layout: a `domain` path plus one
//! `<g class="tick">` per tick holding a tick line and its label.

use chrono::Month;

use crate::color::Rgba;
use crate::error::Result;
use crate::output::{Attributes, SvgElement, TextAnchor};
use crate::scale::{BandScale, LinearScale, Scale, TimeScale};

/// Default distance between the tick line end and its label.
const TICK_PADDING: f64 = 3.0;

/// Label font size.
const TICK_FONT_SIZE: f64 = 10.0;

/// Nice step that splits `[start, stop]` into roughly `count` intervals.
///
/// Negative when `stop < start`.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start).abs() / count.max(1) as f64;
    if step0 == 0.0 || !step0.is_finite() {
        return 0.0;
    }
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= 50f64.sqrt() {
        step1 *= 10.0;
    } else if error >= 10f64.sqrt() {
        step1 *= 5.0;
    } else if error >= 2f64.sqrt() {
        step1 *= 2.0;
    }
    if stop < start {
        -step1
    } else {
        step1
    }
}

/// Nice tick values inside `[start, stop]`, ascending.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return Vec::new();
    }

    if step < 1.0 {
        // divide by the inverse step so 0.1 multiples stay exact
        let inv = (1.0 / step).round();
        let first = (lo * inv).ceil() as i64;
        let last = (hi * inv).floor() as i64;
        (first..=last).map(|i| i as f64 / inv).collect()
    } else {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Whole-year ticks between `first_year` and `last_year`, step at least one.
#[must_use]
pub fn year_ticks(first_year: i32, last_year: i32, count: usize) -> Vec<i32> {
    let (lo, hi) = (first_year.min(last_year), first_year.max(last_year));
    let step = tick_step(f64::from(lo), f64::from(hi), count).round().max(1.0) as i32;
    let first = lo.div_euclid(step) * step;
    let first = if first < lo { first + step } else { first };
    (first..=hi).step_by(step as usize).collect()
}

/// Full English month name for a zero-based month index.
#[must_use]
pub fn month_name(index: usize) -> Option<&'static str> {
    let number = u8::try_from(index + 1).ok()?;
    Month::try_from(number).ok().map(|m| m.name())
}

/// Side of the plot the axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal axis, labels below.
    Bottom,
    /// Vertical axis, labels to the left.
    Left,
}

/// A single tick: pixel position along the axis and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis, in pixels.
    pub position: f64,
    /// Label text.
    pub label: String,
}

/// Axis description, independent of any scale once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orientation: Orientation,
    range: (f64, f64),
    ticks: Vec<Tick>,
    tick_size_inner: f64,
    tick_size_outer: f64,
    domain_line: bool,
}

impl Axis {
    /// New axis spanning `range` pixels, with no ticks yet.
    #[must_use]
    pub fn new(orientation: Orientation, range: (f64, f64)) -> Self {
        Self {
            orientation,
            range,
            ticks: Vec::new(),
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            domain_line: true,
        }
    }

    /// Set the ticks.
    #[must_use]
    pub fn ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.ticks = ticks;
        self
    }

    /// Set both inner and outer tick sizes.
    #[must_use]
    pub fn tick_size(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self.tick_size_outer = size;
        self
    }

    /// Set the size of the end caps on the domain line.
    #[must_use]
    pub fn tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    /// Omit the domain line.
    #[must_use]
    pub fn without_domain(mut self) -> Self {
        self.domain_line = false;
        self
    }

    /// Ticks in drawing order.
    #[must_use]
    pub fn tick_list(&self) -> &[Tick] {
        &self.ticks
    }

    /// Orientation of the axis.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Render as an SVG group with the given attributes (id, transform).
    #[must_use]
    pub fn to_element(&self, attrs: Attributes) -> SvgElement {
        let mut children = Vec::with_capacity(self.ticks.len() + 1);
        let (r0, r1) = self.range;
        let outer = self.tick_size_outer;
        let inner = self.tick_size_inner;
        let spacing = inner.max(0.0) + TICK_PADDING;

        if self.domain_line {
            let d = match self.orientation {
                Orientation::Bottom => format!("M{r0},{outer}V0H{r1}V{outer}"),
                Orientation::Left => format!("M{},{r0}H0V{r1}H{}", -outer, -outer),
            };
            children.push(SvgElement::Path {
                d,
                fill: None,
                stroke: Some(Rgba::BLACK),
                stroke_width: 1.0,
                attrs: Attributes::new().class("domain"),
            });
        }

        for tick in &self.ticks {
            let (translate, line, label) = match self.orientation {
                Orientation::Bottom => (
                    Attributes::new().class("tick").translate(tick.position, 0.0),
                    (0.0, inner),
                    (0.0, spacing, TextAnchor::Middle, "0.71em"),
                ),
                Orientation::Left => (
                    Attributes::new().class("tick").translate(0.0, tick.position),
                    (-inner, 0.0),
                    (-spacing, 0.0, TextAnchor::End, "0.32em"),
                ),
            };
            let (x, y, anchor, dy) = label;
            children.push(SvgElement::Group {
                attrs: translate,
                children: vec![
                    SvgElement::Line {
                        x1: 0.0,
                        y1: 0.0,
                        x2: line.0,
                        y2: line.1,
                        stroke: Rgba::BLACK,
                        stroke_width: 1.0,
                    },
                    SvgElement::Text {
                        x,
                        y,
                        text: tick.label.clone(),
                        font_size: TICK_FONT_SIZE,
                        fill: Rgba::BLACK,
                        anchor,
                        attrs: Attributes::new().set("dy", dy),
                    },
                ],
            });
        }

        SvgElement::Group { attrs, children }
    }
}

/// Horizontal year axis for a time scale.
///
/// # Errors
///
/// Returns an error if a tick year falls outside the supported calendar.
pub fn year_axis(scale: &TimeScale, first_year: i32, last_year: i32, count: usize) -> Result<Axis> {
    let ticks = year_ticks(first_year, last_year, count)
        .into_iter()
        .map(|year| -> Result<Tick> {
            Ok(Tick { position: scale.scale_year(year)?, label: year.to_string() })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Axis::new(Orientation::Bottom, scale.range()).ticks(ticks))
}

/// Vertical month axis for a 12-band scale, one tick at each band center,
/// no end caps.
#[must_use]
pub fn month_axis(scale: &BandScale) -> Axis {
    let ticks = (0..scale.len())
        .filter_map(|i| {
            let position = scale.center(i)?;
            let label = month_name(i).unwrap_or_default().to_string();
            Some(Tick { position, label })
        })
        .collect();
    Axis::new(Orientation::Left, scale.range()).ticks(ticks).tick_size_outer(0.0)
}

/// Legend axis: explicit tick values, one-decimal labels.
#[must_use]
pub fn value_axis(scale: &LinearScale, values: &[f64], tick_size: f64) -> Axis {
    let ticks = values
        .iter()
        .map(|v| Tick { position: scale.scale(*v), label: format!("{v:.1}") })
        .collect();
    Axis::new(Orientation::Bottom, scale.range()).ticks(ticks).tick_size(tick_size)
}
