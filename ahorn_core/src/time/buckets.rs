//! Calendar bucketing of time-stamped observations.
//!
//! Observations are keyed by date stamps (`YYYY`, `YYYY-MM-DD` or
//! `YYYY-MM-DD HH:mm:ss`) and are summed into the start of the enclosing
//! hour, day, week, month, quarter or year. Bucket keys are formatted
//! canonically so that two stamps in the same period always produce the same
//! key, and zero-padded so that key order is chronological order.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};

/// Calendar aggregation grain, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl TimeUnit {
    /// Every unit, finest first.
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Quarter,
        TimeUnit::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Quarter => "quarter",
            TimeUnit::Year => "year",
        }
    }

    /// Capitalised name for unit pickers.
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Hour => "Hour",
            TimeUnit::Day => "Day",
            TimeUnit::Week => "Week",
            TimeUnit::Month => "Month",
            TimeUnit::Quarter => "Quarter",
            TimeUnit::Year => "Year",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| format!("Unknown time unit: {}", s))
    }
}

/// Inclusive sub-range of [`TimeUnit::ALL`] a chart lets the user pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRange {
    min: TimeUnit,
    max: TimeUnit,
}

impl UnitRange {
    /// Creates a unit range, failing when `min` is coarser than `max`.
    pub fn new(min: TimeUnit, max: TimeUnit) -> CatalogResult<Self> {
        if min > max {
            return Err(CatalogError::Configuration(format!(
                "Minimum time unit '{}' is coarser than maximum time unit '{}'",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> TimeUnit {
        self.min
    }

    pub fn max(&self) -> TimeUnit {
        self.max
    }

    /// Units offered for interactive re-aggregation.
    pub fn selectable(&self) -> &'static [TimeUnit] {
        &TimeUnit::ALL[self.min.index()..=self.max.index()]
    }

    pub fn contains(&self, unit: TimeUnit) -> bool {
        unit >= self.min && unit <= self.max
    }

    /// True when only one unit is selectable, in which case aggregation is
    /// a passthrough.
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

impl Default for UnitRange {
    fn default() -> Self {
        Self {
            min: TimeUnit::Hour,
            max: TimeUnit::Year,
        }
    }
}

/// Parses a date stamp in one of the accepted shapes.
///
/// # Examples
///
/// ```
/// use ahorn_core::time::parse_date_stamp;
///
/// assert!(parse_date_stamp("2024").is_some());
/// assert!(parse_date_stamp("2024-02-29").is_some());
/// assert!(parse_date_stamp("2024-02-29 13:05:00").is_some());
/// assert!(parse_date_stamp("last tuesday").is_none());
/// ```
pub fn parse_date_stamp(stamp: &str) -> Option<NaiveDateTime> {
    let stamp = stamp.trim();

    if stamp.len() == 4 && stamp.bytes().all(|b| b.is_ascii_digit()) {
        let year = stamp.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).map(|d| d.and_time(NaiveTime::MIN));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Start of the `unit`-period containing `dt`.
///
/// Weeks start on Sunday.
pub fn bucket_start(dt: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    let date = dt.date();
    let start = match unit {
        TimeUnit::Hour => return date.and_hms_opt(dt.hour(), 0, 0),
        TimeUnit::Day => date,
        TimeUnit::Week => {
            date.checked_sub_days(Days::new(date.weekday().num_days_from_sunday() as u64))?
        }
        TimeUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?,
        TimeUnit::Quarter => {
            let first_month = (date.month0() / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), first_month, 1)?
        }
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?,
    };
    Some(start.and_time(NaiveTime::MIN))
}

/// Canonical label of a bucket start.
pub fn bucket_key(start: NaiveDateTime, unit: TimeUnit) -> String {
    match unit {
        TimeUnit::Hour => start.format("%Y-%m-%d %H:00").to_string(),
        _ => start.format("%Y-%m-%d").to_string(),
    }
}

/// A value that can be summed into a bucket.
pub trait BucketValue: Clone {
    /// Number of components; 1 for scalars.
    fn width(&self) -> usize;

    /// Additive identity with the given number of components.
    fn zero(width: usize) -> Self;

    /// Adds `self` into `acc`.
    fn add_into(&self, acc: &mut Self);
}

impl BucketValue for f64 {
    fn width(&self) -> usize {
        1
    }

    fn zero(_width: usize) -> Self {
        0.0
    }

    fn add_into(&self, acc: &mut Self) {
        *acc += *self;
    }
}

impl BucketValue for Vec<f64> {
    fn width(&self) -> usize {
        self.len()
    }

    fn zero(width: usize) -> Self {
        vec![0.0; width]
    }

    // Missing trailing components count as zero.
    fn add_into(&self, acc: &mut Self) {
        if acc.len() < self.len() {
            acc.resize(self.len(), 0.0);
        }
        for (slot, value) in acc.iter_mut().zip(self) {
            *slot += *value;
        }
    }
}

/// Buckets of an aggregation and the number of stamps left out of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<V> {
    pub buckets: BTreeMap<String, V>,
    /// Entries whose date stamp could not be parsed.
    pub skipped: usize,
}

/// Sums `data` into `unit` buckets keyed by canonical bucket start.
///
/// Vector values are padded to the widest input. Stamps that cannot be
/// parsed are skipped and their values are not counted anywhere, so the
/// bucket totals only equal the input total for well-formed stamps. Use
/// [`aggregate_with_skipped`] to learn how many entries were dropped.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use ahorn_core::time::{aggregate, TimeUnit};
///
/// let data = BTreeMap::from([
///     ("2024-01-01".to_string(), 3.0),
///     ("2024-01-02".to_string(), 5.0),
///     ("2024-02-10".to_string(), 2.0),
/// ]);
/// let monthly = aggregate(&data, TimeUnit::Month);
///
/// assert_eq!(monthly["2024-01-01"], 8.0);
/// assert_eq!(monthly["2024-02-01"], 2.0);
/// ```
pub fn aggregate<V: BucketValue>(
    data: &BTreeMap<String, V>,
    unit: TimeUnit,
) -> BTreeMap<String, V> {
    aggregate_with_skipped(data, unit).buckets
}

/// Like [`aggregate`], also reporting how many entries were skipped.
pub fn aggregate_with_skipped<V: BucketValue>(
    data: &BTreeMap<String, V>,
    unit: TimeUnit,
) -> Aggregation<V> {
    let width = data.values().map(|v| v.width()).max().unwrap_or(0);
    let mut buckets: BTreeMap<String, V> = BTreeMap::new();
    let mut skipped = 0;

    for (stamp, value) in data {
        let Some(start) = parse_date_stamp(stamp).and_then(|dt| bucket_start(dt, unit)) else {
            log::debug!("Skipping unparseable date stamp {:?}", stamp);
            skipped += 1;
            continue;
        };
        let acc = buckets
            .entry(bucket_key(start, unit))
            .or_insert_with(|| V::zero(width));
        value.add_into(acc);
    }

    Aggregation { buckets, skipped }
}
