//! Five-number summaries for box plots.
//!
//! Quartiles use the exclusive median-of-halves method: the sample is split
//! at its median, the median itself is left out of both halves when the
//! sample size is odd, and Q1/Q3 are the medians of the lower/upper halves.
//! Both the raw-sample and the histogram path address the sorted multiset by
//! rank through the same helper, so they agree for equivalent inputs.

use serde::{Deserialize, Serialize};

/// Five-number summary of a numeric distribution.
///
/// Invariant: `min <= q1 <= median <= q3 <= max`.
///
/// # Examples
///
/// ```
/// use ahorn_core::algorithms::BoxPlotStats;
///
/// let stats = BoxPlotStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
/// assert_eq!(stats.q1, 2.0);
/// assert_eq!(stats.median, 4.0);
/// assert_eq!(stats.q3, 6.0);
///
/// assert!(BoxPlotStats::from_values(&[]).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxPlotStats {
    /// Computes the summary of a raw sample.
    ///
    /// Non-finite values are ignored. Returns `None` when nothing usable is
    /// left, which callers render as an explicit "no data" state.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.len() < values.len() {
            log::debug!(
                "Ignoring {} non-finite value(s) in box plot sample",
                values.len() - sorted.len()
            );
        }
        sorted.sort_by(f64::total_cmp);

        five_number_summary(sorted.len() as u64, |rank| sorted[rank as usize])
    }

    /// Computes the summary of a value -> count histogram without
    /// materialising the repeated values.
    pub fn from_histogram(histogram: &Histogram) -> Option<Self> {
        five_number_summary(histogram.total(), |rank| histogram.rank_to_value(rank))
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Sparse value -> frequency representation of a sample.
///
/// Entries are kept sorted by value with duplicates merged; only finite
/// values with a positive count are retained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    entries: Vec<(f64, u64)>,
    total: u64,
}

impl Histogram {
    /// Builds a histogram from `(value, count)` pairs.
    ///
    /// Counts are floored to whole observations; non-finite values and
    /// counts below one are dropped. Counts and the total saturate at
    /// `u64::MAX`.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut entries: Vec<(f64, u64)> = pairs
            .into_iter()
            .filter(|(value, count)| value.is_finite() && count.is_finite() && *count >= 1.0)
            .map(|(value, count)| (value, count.floor() as u64))
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut merged: Vec<(f64, u64)> = Vec::with_capacity(entries.len());
        for (value, count) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == value => last.1 = last.1.saturating_add(count),
                _ => merged.push((value, count)),
            }
        }

        let total = merged
            .iter()
            .fold(0u64, |acc, (_, count)| acc.saturating_add(*count));
        Self {
            entries: merged,
            total,
        }
    }

    /// Builds a histogram whose keys are numbers written as strings, as
    /// they appear in datasheet front-matter. Non-numeric keys are skipped.
    pub fn from_string_keys<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self::from_pairs(pairs.into_iter().filter_map(|(key, count)| {
            match key.trim().parse::<f64>() {
                Ok(value) => Some((value, count)),
                Err(_) => {
                    log::debug!("Skipping non-numeric histogram key {:?}", key);
                    None
                }
            }
        }))
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Sorted `(value, count)` entries.
    pub fn entries(&self) -> &[(f64, u64)] {
        &self.entries
    }

    /// Value at zero-based `rank` in the implicit sorted multiset.
    ///
    /// Ranks past the end resolve to the largest value.
    pub fn rank_to_value(&self, rank: u64) -> f64 {
        let mut cumulative = 0u64;
        for &(value, count) in &self.entries {
            cumulative = cumulative.saturating_add(count);
            if cumulative > rank {
                return value;
            }
        }
        self.entries.last().map(|(value, _)| *value).unwrap_or(f64::NAN)
    }
}

/// Median of the `len` ranks starting at `offset`.
fn median_of<F>(offset: u64, len: u64, value_at: &F) -> Option<f64>
where
    F: Fn(u64) -> f64,
{
    if len == 0 {
        return None;
    }
    let mid = offset + len / 2;
    if len % 2 == 0 {
        Some((value_at(mid - 1) + value_at(mid)) / 2.0)
    } else {
        Some(value_at(mid))
    }
}

fn five_number_summary<F>(n: u64, value_at: F) -> Option<BoxPlotStats>
where
    F: Fn(u64) -> f64,
{
    let median = median_of(0, n, &value_at)?;

    let half = n / 2;
    let upper_offset = half + n % 2;

    let q1 = median_of(0, half, &value_at).unwrap_or(median);
    let q3 = median_of(upper_offset, n - upper_offset, &value_at).unwrap_or(median);

    Some(BoxPlotStats {
        min: value_at(0),
        q1,
        median,
        q3,
        max: value_at(n - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(min: f64, q1: f64, median: f64, q3: f64, max: f64) -> BoxPlotStats {
        BoxPlotStats {
            min,
            q1,
            median,
            q3,
            max,
        }
    }

    #[test]
    fn test_odd_sample() {
        let result = BoxPlotStats::from_values(&[7.0, 3.0, 1.0, 5.0, 2.0, 6.0, 4.0]).unwrap();
        assert_eq!(result, stats(1.0, 2.0, 4.0, 6.0, 7.0));
    }

    #[test]
    fn test_even_sample() {
        let result = BoxPlotStats::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(result, stats(1.0, 1.5, 2.5, 3.5, 4.0));
    }

    #[test]
    fn test_single_value_collapses() {
        let result = BoxPlotStats::from_values(&[42.0]).unwrap();
        assert_eq!(result, stats(42.0, 42.0, 42.0, 42.0, 42.0));
    }

    #[test]
    fn test_two_values() {
        let result = BoxPlotStats::from_values(&[10.0, 20.0]).unwrap();
        assert_eq!(result, stats(10.0, 10.0, 15.0, 20.0, 20.0));
    }

    #[test]
    fn test_empty_sample_is_no_data() {
        assert!(BoxPlotStats::from_values(&[]).is_none());
        assert!(BoxPlotStats::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let result = BoxPlotStats::from_values(&[1.0, f64::NAN, 2.0, 3.0]).unwrap();
        assert_eq!(result, stats(1.0, 1.0, 2.0, 3.0, 3.0));
    }

    #[test]
    fn test_histogram_matches_array() {
        let array = BoxPlotStats::from_values(&[1.0, 1.0, 2.0, 3.0, 3.0, 3.0]).unwrap();
        let histogram = Histogram::from_string_keys([("1", 2.0), ("2", 1.0), ("3", 3.0)]);
        let from_histogram = BoxPlotStats::from_histogram(&histogram).unwrap();

        assert_eq!(array, from_histogram);
        assert_eq!(from_histogram, stats(1.0, 1.0, 2.5, 3.0, 3.0));
    }

    #[test]
    fn test_histogram_filters_invalid_entries() {
        let histogram = Histogram::from_string_keys([
            ("1", 1.0),
            ("abc", 10.0),
            ("2", 0.0),
            ("3", -4.0),
            ("4", 1.0),
        ]);
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.entries(), &[(1.0, 1), (4.0, 1)]);
    }

    #[test]
    fn test_histogram_merges_equal_keys() {
        let histogram = Histogram::from_string_keys([("1", 2.0), ("1.0", 3.0)]);
        assert_eq!(histogram.entries(), &[(1.0, 5)]);
    }

    #[test]
    fn test_empty_histogram_is_no_data() {
        let histogram = Histogram::from_string_keys([("x", 3.0), ("1", 0.0)]);
        assert!(histogram.is_empty());
        assert!(BoxPlotStats::from_histogram(&histogram).is_none());
    }

    #[test]
    fn test_rank_to_value() {
        let histogram = Histogram::from_pairs([(5.0, 2.0), (1.0, 1.0)]);
        assert_eq!(histogram.rank_to_value(0), 1.0);
        assert_eq!(histogram.rank_to_value(1), 5.0);
        assert_eq!(histogram.rank_to_value(2), 5.0);
        assert_eq!(histogram.rank_to_value(99), 5.0);
    }

    #[test]
    fn test_large_multiplicities() {
        let histogram = Histogram::from_pairs([(1.0, 1_000_000.0), (2.0, 3_000_000.0)]);
        let result = BoxPlotStats::from_histogram(&histogram).unwrap();
        assert_eq!(result.min, 1.0);
        assert_eq!(result.q1, 1.5);
        assert_eq!(result.median, 2.0);
        assert_eq!(result.max, 2.0);
    }

    #[test]
    fn test_counts_beyond_u64_saturate() {
        let histogram = Histogram::from_pairs([(1.0, 1e19), (2.0, 1e19)]);
        assert_eq!(histogram.total(), u64::MAX);

        let result = BoxPlotStats::from_histogram(&histogram).unwrap();
        assert_eq!(result.min, 1.0);
        assert_eq!(result.median, 1.0);
        assert_eq!(result.q3, 2.0);
        assert_eq!(result.max, 2.0);
    }

    #[test]
    fn test_merged_counts_saturate() {
        let histogram = Histogram::from_pairs([(3.0, 1.5e19), (3.0, 1.5e19)]);
        assert_eq!(histogram.entries(), &[(3.0, u64::MAX)]);
        assert_eq!(histogram.rank_to_value(u64::MAX - 1), 3.0);
    }
}
