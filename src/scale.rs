//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or a bound is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale from data extent.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f64, f64)) -> Option<Self> {
        let (min, max) = extent(data)?;
        Self::new((min, max), range).ok()
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Minimum and maximum of a slice, ignoring NaN. `None` when nothing is left.
#[must_use]
pub fn extent(data: &[f64]) -> Option<(f64, f64)> {
    let mut values = data.iter().copied().filter(|v| !v.is_nan());
    let first = values.next()?;
    Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Time scale mapping calendar dates linearly onto a pixel range.
///
/// Positions are proportional to elapsed days, so leap years take up
/// slightly more room than common years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    range_min: f64,
    range_max: f64,
}

impl TimeScale {
    /// Create a time scale over `[start, end]`.
    ///
    /// A zero-length domain is allowed; every date then maps to the middle
    /// of the range.
    #[must_use]
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self {
            start: domain.0,
            end: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Time scale over January 1st of the first and last year.
    ///
    /// # Errors
    ///
    /// Returns an error if a year is outside the calendar chrono supports.
    pub fn for_years(first_year: i32, last_year: i32, range: (f64, f64)) -> Result<Self> {
        Ok(Self::new((year_start(first_year)?, year_start(last_year)?), range))
    }

    /// Pixel position of January 1st of `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the supported calendar.
    pub fn scale_year(&self, year: i32) -> Result<f64> {
        Ok(self.scale(year_start(year)?))
    }
}

impl Scale<NaiveDate, f64> for TimeScale {
    fn scale(&self, value: NaiveDate) -> f64 {
        let span = (self.end - self.start).num_days();
        if span == 0 {
            return (self.range_min + self.range_max) / 2.0;
        }
        let t = (value - self.start).num_days() as f64 / span as f64;
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// January 1st of `year`.
///
/// # Errors
///
/// Returns an error if the year is outside the supported calendar.
pub fn year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| Error::ScaleDomain(format!("year {year} is out of range")))
}

/// Band scale: `n` discrete slots mapped to evenly sized, contiguous pixel
/// bands, rounded to whole pixels.
///
/// The step is floored and the leftover pixels are split evenly before the
/// first and after the last band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    count: usize,
    range_min: f64,
    range_max: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Create a band scale with `count` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero.
    pub fn new(count: usize, range: (f64, f64)) -> Result<Self> {
        if count == 0 {
            return Err(Error::ScaleDomain("Band scale requires at least one band".to_string()));
        }

        let (lo, hi) = if range.1 < range.0 { (range.1, range.0) } else { (range.0, range.1) };
        let step = ((hi - lo) / count as f64).floor();
        let start = (lo + (hi - lo - step * count as f64) * 0.5).round();

        Ok(Self {
            count,
            range_min: range.0,
            range_max: range.1,
            start,
            step,
            bandwidth: step.round(),
        })
    }

    /// Start of the band for `index`, or `None` if the index is out of domain.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + self.step * index as f64)
    }

    /// Center of the band for `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|p| p + self.bandwidth / 2.0)
    }

    /// Width of each band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of bands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the scale has no bands (never true for a constructed scale).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Range extent the scale was built for.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Threshold scale: ordered cut points classify a continuous value into one
/// of `boundaries.len() + 1` outputs.
///
/// A value equal to a boundary belongs to the upper bin. Values below the
/// first boundary map to the first output, values at or above the last
/// boundary to the last output.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale<T> {
    boundaries: Vec<f64>,
    outputs: Vec<T>,
}

impl<T: Clone> ThresholdScale<T> {
    /// Create a threshold scale from explicit boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error if outputs is empty, the lengths don't line up, or the
    /// boundaries are not finite and ascending.
    pub fn new(boundaries: Vec<f64>, outputs: Vec<T>) -> Result<Self> {
        if outputs.is_empty() {
            return Err(Error::ScaleDomain(
                "Threshold scale requires at least one output".to_string(),
            ));
        }
        if outputs.len() != boundaries.len() + 1 {
            return Err(Error::ScaleDomain(format!(
                "{} boundaries need {} outputs, got {}",
                boundaries.len(),
                boundaries.len() + 1,
                outputs.len()
            )));
        }
        if boundaries.iter().any(|b| !b.is_finite()) {
            return Err(Error::ScaleDomain("Threshold boundaries must be finite".to_string()));
        }
        if boundaries.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::ScaleDomain("Threshold boundaries must be ascending".to_string()));
        }

        Ok(Self { boundaries, outputs })
    }

    /// Split `[min, max]` into `outputs.len()` equal-width bins.
    ///
    /// Boundaries are `min + k * step` for `k = 1..outputs.len()`, computed
    /// directly rather than accumulated so the count is always exact.
    ///
    /// # Errors
    ///
    /// Returns an error if `max <= min`, a bound is not finite, or outputs is
    /// empty.
    pub fn equal_width(min: f64, max: f64, outputs: Vec<T>) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(Error::ScaleDomain(format!(
                "cannot split [{min}, {max}] into equal-width bins"
            )));
        }
        if outputs.is_empty() {
            return Err(Error::ScaleDomain(
                "Threshold scale requires at least one output".to_string(),
            ));
        }

        let bins = outputs.len();
        let step = (max - min) / bins as f64;
        let boundaries = (1..bins).map(|k| min + step * k as f64).collect();

        Self::new(boundaries, outputs)
    }

    /// Bin index for `value`.
    #[must_use]
    pub fn index_of(&self, value: f64) -> usize {
        self.boundaries.partition_point(|b| *b <= value)
    }

    /// Domain interval covered by the output at `index`.
    ///
    /// Open-ended outer bins report `None` for their missing bound.
    #[must_use]
    pub fn invert_extent(&self, index: usize) -> Option<(Option<f64>, Option<f64>)> {
        if index >= self.outputs.len() {
            return None;
        }
        let lower = index.checked_sub(1).map(|i| self.boundaries[i]);
        let upper = self.boundaries.get(index).copied();
        Some((lower, upper))
    }

    /// Cut points in ascending order.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Outputs in bin order.
    #[must_use]
    pub fn outputs(&self) -> &[T] {
        &self.outputs
    }
}

impl<T: Clone> Scale<f64, T> for ThresholdScale<T> {
    fn scale(&self, value: f64) -> T {
        self.outputs[self.index_of(value)].clone()
    }

    fn domain(&self) -> (f64, f64) {
        match (self.boundaries.first(), self.boundaries.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    fn range(&self) -> (T, T) {
        // outputs is never empty once constructed
        let first = self.outputs[0].clone();
        let last = self.outputs[self.outputs.len() - 1].clone();
        (first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.invert(0.5), 50.0);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_from_data() {
        let scale = LinearScale::from_data(&[2.0, 0.0, 10.0], (0.0, 240.0))
            .expect("operation should succeed");
        assert_eq!(scale.domain(), (0.0, 10.0));
        assert_relative_eq!(scale.scale(5.0), 120.0);
        assert!(LinearScale::from_data(&[], (0.0, 1.0)).is_none());
        assert!(LinearScale::from_data(&[5.0, 5.0], (0.0, 1.0)).is_none());
    }

    #[test]
    fn test_extent_skips_nan() {
        assert_eq!(extent(&[3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(&[f64::NAN]), None);
    }

    #[test]
    fn test_time_scale_endpoints() {
        let scale = TimeScale::for_years(1753, 2015, (60.0, 770.0)).unwrap();
        assert_relative_eq!(scale.scale_year(1753).unwrap(), 60.0);
        assert_relative_eq!(scale.scale_year(2015).unwrap(), 770.0);
        let mid = scale.scale_year(1884).unwrap();
        assert!(mid > 60.0 && mid < 770.0);
    }

    #[test]
    fn test_time_scale_single_year_is_centered() {
        let scale = TimeScale::for_years(2000, 2000, (0.0, 100.0)).unwrap();
        assert_relative_eq!(scale.scale_year(2000).unwrap(), 50.0);
    }

    #[test]
    fn test_time_scale_leap_year_is_wider() {
        let scale = TimeScale::for_years(2000, 2002, (0.0, 731.0)).unwrap();
        // 2000 is a leap year: 366 days before 2001-01-01
        assert_relative_eq!(scale.scale_year(2001).unwrap(), 366.0);
    }

    #[test]
    fn test_band_scale_months() {
        let scale = BandScale::new(12, (60.0, 340.0)).unwrap();
        assert_relative_eq!(scale.step(), 23.0);
        assert_relative_eq!(scale.bandwidth(), 23.0);
        assert_eq!(scale.position(0), Some(62.0));
        assert_eq!(scale.position(11), Some(62.0 + 23.0 * 11.0));
        assert_eq!(scale.position(12), None);
        assert_eq!(scale.center(0), Some(73.5));
    }

    #[test]
    fn test_band_scale_exact_fit() {
        let scale = BandScale::new(4, (0.0, 100.0)).unwrap();
        assert_eq!(scale.position(0), Some(0.0));
        assert_eq!(scale.position(3), Some(75.0));
        assert_relative_eq!(scale.bandwidth(), 25.0);
    }

    #[test]
    fn test_band_scale_empty_domain() {
        assert!(BandScale::new(0, (0.0, 100.0)).is_err());
    }

    #[test]
    fn test_threshold_equal_width() {
        let scale = ThresholdScale::equal_width(0.0, 9.0, (0..9).collect::<Vec<u8>>()).unwrap();
        assert_eq!(scale.boundaries().len(), 8);
        assert_relative_eq!(scale.boundaries()[0], 1.0);
        assert_relative_eq!(scale.boundaries()[7], 8.0);
    }

    #[test]
    fn test_threshold_boundary_goes_up() {
        let scale = ThresholdScale::new(vec![1.0, 2.0], vec!['a', 'b', 'c']).unwrap();
        assert_eq!(scale.scale(0.5), 'a');
        assert_eq!(scale.scale(1.0), 'b');
        assert_eq!(scale.scale(1.5), 'b');
        assert_eq!(scale.scale(2.0), 'c');
    }

    #[test]
    fn test_threshold_open_ended() {
        let scale = ThresholdScale::new(vec![1.0, 2.0], vec!['a', 'b', 'c']).unwrap();
        assert_eq!(scale.scale(-1000.0), 'a');
        assert_eq!(scale.scale(1000.0), 'c');
    }

    #[test]
    fn test_threshold_invert_extent() {
        let scale = ThresholdScale::new(vec![1.0, 2.0], vec!['a', 'b', 'c']).unwrap();
        assert_eq!(scale.invert_extent(0), Some((None, Some(1.0))));
        assert_eq!(scale.invert_extent(1), Some((Some(1.0), Some(2.0))));
        assert_eq!(scale.invert_extent(2), Some((Some(2.0), None)));
        assert_eq!(scale.invert_extent(3), None);
    }

    #[test]
    fn test_threshold_invalid() {
        assert!(ThresholdScale::<u8>::new(vec![], vec![]).is_err());
        assert!(ThresholdScale::new(vec![1.0], vec![0u8]).is_err());
        assert!(ThresholdScale::new(vec![2.0, 1.0], vec![0u8, 1, 2]).is_err());
        assert!(ThresholdScale::equal_width(5.0, 5.0, vec![0u8, 1]).is_err());
        assert!(ThresholdScale::<u8>::equal_width(0.0, 1.0, vec![]).is_err());
    }

    #[test]
    fn test_threshold_domain_range() {
        let scale = ThresholdScale::new(vec![1.0, 2.0], vec!['a', 'b', 'c']).unwrap();
        assert_eq!(scale.domain(), (1.0, 2.0));
        assert_eq!(scale.range(), ('a', 'c'));

        let single = ThresholdScale::new(vec![], vec!['x']).unwrap();
        assert_eq!(single.scale(42.0), 'x');
        assert_eq!(single.domain(), (f64::NEG_INFINITY, f64::INFINITY));
    }
}
