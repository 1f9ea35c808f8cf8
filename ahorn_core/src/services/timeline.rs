//! Temporal chart view-models.
//!
//! A [`TemporalChart`] holds date-stamped values together with the range of
//! units the reader may aggregate by. The active unit starts at the finest
//! allowed unit. Output series are always in chronological order.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::time::buckets::{aggregate, bucket_start, parse_date_stamp, BucketValue, TimeUnit, UnitRange};

/// Title of the stacked simplex-count chart.
pub const SHAPE_CHART_TITLE: &str = "Dataset Shape";

/// Scalar time series for a line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub unit: TimeUnit,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One stacked layer, e.g. all 2-simplices over time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Stacked bar chart with one layer per rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedSeries {
    pub unit: TimeUnit,
    pub labels: Vec<String>,
    pub ranks: Vec<RankSeries>,
}

/// Date-stamped data with a user-selectable aggregation unit.
#[derive(Debug, Clone)]
pub struct TemporalChart<V: BucketValue> {
    data: BTreeMap<String, V>,
    units: UnitRange,
    active: TimeUnit,
}

impl<V: BucketValue> TemporalChart<V> {
    pub fn new(data: BTreeMap<String, V>, units: UnitRange) -> Self {
        Self {
            data,
            active: units.min(),
            units,
        }
    }

    /// Units offered in the "Aggregate by" selector, finest first.
    pub fn selectable_units(&self) -> &'static [TimeUnit] {
        self.units.selectable()
    }

    pub fn active_unit(&self) -> TimeUnit {
        self.active
    }

    /// Switches the aggregation unit. Units outside the configured range
    /// are ignored and `false` is returned.
    pub fn select_unit(&mut self, unit: TimeUnit) -> bool {
        if !self.units.contains(unit) {
            log::debug!(
                "Ignoring unit {} outside {}..={}",
                unit,
                self.units.min(),
                self.units.max()
            );
            return false;
        }
        self.active = unit;
        true
    }

    /// Values summed per bucket of the active unit.
    ///
    /// With a single selectable unit the data is returned as given.
    pub fn buckets(&self) -> BTreeMap<String, V> {
        if self.units.is_single() {
            return self.data.clone();
        }
        aggregate(&self.data, self.active)
    }

    /// Number of entries left out of [`Self::buckets`] because their date
    /// stamp could not be parsed. Always 0 with a single selectable unit.
    pub fn skipped_stamps(&self) -> usize {
        if self.units.is_single() {
            return 0;
        }
        self.data
            .keys()
            .filter(|stamp| {
                parse_date_stamp(stamp)
                    .and_then(|dt| bucket_start(dt, self.active))
                    .is_none()
            })
            .count()
    }
}

impl TemporalChart<f64> {
    pub fn series(&self) -> TimeSeries {
        let buckets = self.buckets();
        TimeSeries {
            unit: self.active,
            labels: buckets.keys().cloned().collect(),
            values: buckets.into_values().collect(),
        }
    }
}

impl TemporalChart<Vec<f64>> {
    /// Stacked layers labelled `Rank 0`, `Rank 1`, ...; shorter vectors are
    /// padded with zeros.
    pub fn stacked_series(&self) -> StackedSeries {
        let buckets = self.buckets();
        let width = buckets.values().map(Vec::len).max().unwrap_or(0);

        let ranks = (0..width)
            .map(|rank| RankSeries {
                label: format!("Rank {}", rank),
                values: buckets
                    .values()
                    .map(|counts| counts.get(rank).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        StackedSeries {
            unit: self.active,
            labels: buckets.keys().cloned().collect(),
            ranks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily() -> BTreeMap<String, f64> {
        [
            ("2024-01-01", 3.0),
            ("2024-01-02", 5.0),
            ("2024-02-10", 2.0),
            ("2023-12-31", 1.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[test]
    fn test_active_unit_defaults_to_min() {
        let units = UnitRange::new(TimeUnit::Day, TimeUnit::Year).unwrap();
        let chart = TemporalChart::new(daily(), units);
        assert_eq!(chart.active_unit(), TimeUnit::Day);
        assert_eq!(chart.selectable_units().len(), 5);
    }

    #[test]
    fn test_select_unit_respects_range() {
        let units = UnitRange::new(TimeUnit::Day, TimeUnit::Month).unwrap();
        let mut chart = TemporalChart::new(daily(), units);
        assert!(chart.select_unit(TimeUnit::Month));
        assert!(!chart.select_unit(TimeUnit::Year));
        assert_eq!(chart.active_unit(), TimeUnit::Month);
    }

    #[test]
    fn test_series_is_chronological() {
        let mut chart = TemporalChart::new(daily(), UnitRange::default());
        chart.select_unit(TimeUnit::Month);
        let series = chart.series();
        assert_eq!(series.labels, vec!["2023-12-01", "2024-01-01", "2024-02-01"]);
        assert_eq!(series.values, vec![1.0, 8.0, 2.0]);
    }

    #[test]
    fn test_single_unit_passes_through() {
        let mut data = daily();
        data.insert("not a date".to_string(), 4.0);
        let units = UnitRange::new(TimeUnit::Year, TimeUnit::Year).unwrap();
        let chart = TemporalChart::new(data.clone(), units);
        assert_eq!(chart.buckets(), data);
        assert_eq!(chart.skipped_stamps(), 0);
    }

    #[test]
    fn test_skipped_stamps_are_counted() {
        let mut data = daily();
        data.insert("not a date".to_string(), 4.0);
        data.insert("2024-02-30".to_string(), 9.0);
        let mut chart = TemporalChart::new(data, UnitRange::default());
        chart.select_unit(TimeUnit::Month);

        assert_eq!(chart.skipped_stamps(), 2);
        let total: f64 = chart.series().values.iter().sum();
        assert_eq!(total, daily().values().sum::<f64>());
    }

    #[test]
    fn test_stacked_series_pads_ranks() {
        let shape: BTreeMap<String, Vec<f64>> = [
            ("2024-03-01 10:15:00", vec![1.0, 2.0]),
            ("2024-03-01 10:45:00", vec![1.0, 1.0, 1.0]),
            ("2024-03-01 11:05:00", vec![4.0]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let chart = TemporalChart::new(shape, UnitRange::default());
        let stacked = chart.stacked_series();
        assert_eq!(stacked.unit, TimeUnit::Hour);
        assert_eq!(stacked.labels, vec!["2024-03-01 10:00", "2024-03-01 11:00"]);
        assert_eq!(stacked.ranks.len(), 3);
        assert_eq!(stacked.ranks[0].label, "Rank 0");
        assert_eq!(stacked.ranks[0].values, vec![2.0, 4.0]);
        assert_eq!(stacked.ranks[2].values, vec![1.0, 0.0]);
    }
}
