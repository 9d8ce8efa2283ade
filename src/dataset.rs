//! Monthly land-surface temperature dataset.
//!
//! The JSON document has the shape
//!
//! ```json
//! { "baseTemperature": 8.66,
//!   "monthlyVariance": [ { "year": 1753, "month": 1, "variance": -1.366 } ] }
//! ```
//!
//! Records are read-only once parsed. Validation rejects what the chart
//! cannot place: months outside 1..=12, duplicated `(year, month)` pairs,
//! non-finite numbers and an empty record list.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scale::extent;

/// One month's deviation from the base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MonthRecord {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 = January.
    pub month: u32,
    /// Delta from the base temperature, in °C.
    pub variance: f64,
}

impl MonthRecord {
    /// Zero-based month index, the key of the vertical band.
    ///
    /// Month 0 (only possible before validation) saturates to index 0.
    #[must_use]
    pub const fn month_index(&self) -> usize {
        self.month.saturating_sub(1) as usize
    }
}

/// The full dataset: a base temperature and its monthly variances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    base_temperature: f64,
    monthly_variance: Vec<MonthRecord>,
}

impl Dataset {
    /// Build a dataset from parts, validating it.
    ///
    /// # Errors
    ///
    /// See [`Dataset::validate`].
    pub fn new(base_temperature: f64, monthly_variance: Vec<MonthRecord>) -> Result<Self> {
        let dataset = Self { base_temperature, monthly_variance };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document does not match the expected
    /// shape, or a validation error (see [`Dataset::validate`]).
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        debug!(
            records = dataset.len(),
            base_temperature = dataset.base_temperature,
            "parsed dataset"
        );
        Ok(dataset)
    }

    /// Check the invariants the chart relies on.
    ///
    /// # Errors
    ///
    /// - [`Error::NonFinite`] for a NaN/infinite base temperature or variance
    /// - [`Error::EmptyData`] when there are no records
    /// - [`Error::InvalidMonth`] for a month outside 1..=12
    /// - [`Error::DuplicateRecord`] when a `(year, month)` pair repeats
    pub fn validate(&self) -> Result<()> {
        if !self.base_temperature.is_finite() {
            return Err(Error::NonFinite { field: "baseTemperature".to_string() });
        }
        if self.monthly_variance.is_empty() {
            return Err(Error::EmptyData);
        }

        let mut seen = HashSet::with_capacity(self.monthly_variance.len());
        for record in &self.monthly_variance {
            if !(1..=12).contains(&record.month) {
                return Err(Error::InvalidMonth { year: record.year, month: record.month });
            }
            if !record.variance.is_finite() {
                return Err(Error::NonFinite {
                    field: format!("variance of {}-{:02}", record.year, record.month),
                });
            }
            if !seen.insert((record.year, record.month)) {
                return Err(Error::DuplicateRecord { year: record.year, month: record.month });
            }
        }

        Ok(())
    }

    /// Reference temperature in °C.
    #[must_use]
    pub const fn base_temperature(&self) -> f64 {
        self.base_temperature
    }

    /// Records in input order.
    #[must_use]
    pub fn records(&self) -> &[MonthRecord] {
        &self.monthly_variance
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    /// Whether there are no records. Always false for a validated dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// Absolute temperature of a record.
    #[must_use]
    pub fn temperature(&self, record: &MonthRecord) -> f64 {
        self.base_temperature + record.variance
    }

    /// Absolute temperatures, in record order.
    #[must_use]
    pub fn temperatures(&self) -> Vec<f64> {
        self.monthly_variance.iter().map(|r| self.temperature(r)).collect()
    }

    /// Coldest and warmest absolute temperature.
    #[must_use]
    pub fn temperature_extent(&self) -> Option<(f64, f64)> {
        extent(&self.temperatures())
    }

    /// First and last year present.
    #[must_use]
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let first = self.monthly_variance.iter().map(|r| r.year).min()?;
        let last = self.monthly_variance.iter().map(|r| r.year).max()?;
        Some((first, last))
    }
}
