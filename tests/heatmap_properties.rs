//! Property-based tests for the record-to-mark mapping.
//!
//! Run: cargo test --test heatmap_properties

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use climate_heatmap::prelude::*;
use proptest::prelude::*;

/// Unique (year, month) keys with arbitrary variances.
fn records() -> impl Strategy<Value = BTreeMap<(i32, u32), f64>> {
    proptest::collection::btree_map((1700i32..2030, 1u32..=12), -6.0f64..6.0, 1..150)
}

fn dataset(base: f64, records: &BTreeMap<(i32, u32), f64>) -> Dataset {
    let records = records
        .iter()
        .map(|(&(year, month), &variance)| MonthRecord { year, month, variance })
        .collect();
    Dataset::new(base, records).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// One cell per record, in record order.
    #[test]
    fn prop_one_cell_per_record(base in -5.0f64..15.0, recs in records()) {
        let data = dataset(base, &recs);
        let heatmap = CalendarHeatmap::new(&data).build().unwrap();

        prop_assert_eq!(heatmap.cell_count(), data.len());
        for (cell, record) in heatmap.cells().iter().zip(data.records()) {
            prop_assert_eq!(cell.year, record.year);
            prop_assert_eq!(cell.month_index, record.month_index());
        }
    }

    /// Later years never render to the left of earlier ones, and every x
    /// stays inside the horizontal range.
    #[test]
    fn prop_x_non_decreasing_in_year(recs in records()) {
        let data = dataset(8.0, &recs);
        let heatmap = CalendarHeatmap::new(&data).build().unwrap();

        let mut cells = heatmap.cells().to_vec();
        cells.sort_by_key(|c| c.year);
        for pair in cells.windows(2) {
            prop_assert!(pair[0].x <= pair[1].x + 1e-9);
        }
        for cell in &cells {
            prop_assert!(cell.x >= 60.0 - 1e-9 && cell.x <= 770.0 + 1e-9);
        }
    }

    /// Vertical position depends only on the month.
    #[test]
    fn prop_y_is_month_band(recs in records()) {
        let data = dataset(8.0, &recs);
        let heatmap = CalendarHeatmap::new(&data).build().unwrap();
        let bands = heatmap.y_scale();

        prop_assert_eq!(bands.len(), 12);
        for cell in heatmap.cells() {
            prop_assert!(cell.month_index < 12);
            prop_assert_eq!(Some(cell.y), bands.position(cell.month_index));
        }
    }

    /// Color is a function of temperature and never moves toward the cool
    /// end as temperature rises.
    #[test]
    fn prop_color_monotonic_in_temperature(recs in records()) {
        let data = dataset(8.0, &recs);
        let heatmap = CalendarHeatmap::new(&data).build().unwrap();
        let colors = heatmap.color_scale();

        let mut cells = heatmap.cells().to_vec();
        cells.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));
        for cell in &cells {
            prop_assert_eq!(cell.color, colors.scale(cell.temperature));
        }
        for pair in cells.windows(2) {
            prop_assert!(
                colors.index_of(pair[0].temperature) <= colors.index_of(pair[1].temperature)
            );
        }
    }

    /// The legend always has one swatch per color and spans its full width.
    #[test]
    fn prop_legend_tiles_width(recs in records(), width in 50.0f64..600.0) {
        let data = dataset(8.0, &recs);
        let heatmap = CalendarHeatmap::new(&data).legend_width(width).build().unwrap();
        let swatches = heatmap.legend().swatches();

        prop_assert_eq!(swatches.len(), 9);
        let total: f64 = swatches.iter().map(|s| s.width).sum();
        prop_assert!((total - width).abs() < 1e-6, "swatches span {} of {}", total, width);
        for swatch in swatches {
            prop_assert!(swatch.width >= -1e-9);
        }
    }
}
