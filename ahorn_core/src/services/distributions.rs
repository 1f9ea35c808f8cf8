//! View-models for the distribution charts on dataset pages.
//!
//! Each function takes raw datasheet values and returns exactly what a chart
//! needs to draw: box plot geometry in percent, sorted degree series, bar and
//! pie slices. Missing or unusable data turns into an explicit no-data state
//! rather than an error.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::algorithms::box_plot::{BoxPlotStats, Histogram};
use crate::core::domain::{DatasetSummary, NetworkType, StatValue};
use crate::transformations::query_string::network_type_href;

/// Narrowest box drawn for a zero-width interquartile range, in percent.
const MIN_BOX_WIDTH: f64 = 0.5;

pub const DEFAULT_DEGREE_TITLE: &str = "Node Degree Distribution";

/// Horizontal positions of the box plot marks, in percent of the whisker span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlotLayout {
    pub box_start: f64,
    pub box_width: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub whisker_min: f64,
    pub whisker_max: f64,
}

impl BoxPlotLayout {
    pub fn from_stats(stats: &BoxPlotStats) -> Self {
        let span = stats.max - stats.min;
        let span = if span == 0.0 { 1.0 } else { span };
        let to_percent = |value: f64| (value - stats.min) / span * 100.0;

        let box_start = to_percent(stats.q1);
        let box_end = to_percent(stats.q3);
        let box_width = (box_end - box_start).max(MIN_BOX_WIDTH).min(100.0 - box_start);

        Self {
            box_start,
            box_width,
            median: to_percent(stats.median),
            q1: box_start,
            q3: box_end,
            whisker_min: to_percent(stats.min),
            whisker_max: to_percent(stats.max),
        }
    }
}

/// A box plot ready to render, or the message shown instead of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum BoxPlotView {
    #[serde(rename_all = "camelCase")]
    Ready {
        title: Option<String>,
        stats: BoxPlotStats,
        layout: BoxPlotLayout,
    },
    NoData {
        message: String,
    },
}

impl BoxPlotView {
    /// Box plot of a raw sample. `subject` names the data in the no-data
    /// message, e.g. "average degree".
    pub fn from_values(subject: &str, title: Option<&str>, values: &[f64]) -> Self {
        Self::from_stats(subject, title, BoxPlotStats::from_values(values))
    }

    pub fn from_histogram(subject: &str, title: Option<&str>, histogram: &Histogram) -> Self {
        Self::from_stats(subject, title, BoxPlotStats::from_histogram(histogram))
    }

    /// Box plot of one datasheet statistic, whatever its shape.
    pub fn from_stat(subject: &str, title: Option<&str>, value: Option<&StatValue>) -> Self {
        match value {
            Some(StatValue::Values(values)) => Self::from_values(subject, title, values),
            Some(StatValue::Histogram(counts)) => Self::from_histogram(
                subject,
                title,
                &Histogram::from_string_keys(counts.iter().map(|(k, v)| (k.as_str(), *v))),
            ),
            Some(StatValue::Number(n)) => Self::from_values(subject, title, &[*n]),
            Some(StatValue::Other(other)) => {
                log::debug!("Statistic {:?} has no numeric shape: {}", subject, other);
                Self::no_data(subject)
            }
            None => Self::no_data(subject),
        }
    }

    fn from_stats(subject: &str, title: Option<&str>, stats: Option<BoxPlotStats>) -> Self {
        match stats {
            Some(stats) => BoxPlotView::Ready {
                title: title.map(str::to_string),
                layout: BoxPlotLayout::from_stats(&stats),
                stats,
            },
            None => Self::no_data(subject),
        }
    }

    fn no_data(subject: &str) -> Self {
        BoxPlotView::NoData {
            message: format!("No {} data available.", subject),
        }
    }

    pub fn stats(&self) -> Option<&BoxPlotStats> {
        match self {
            BoxPlotView::Ready { stats, .. } => Some(stats),
            BoxPlotView::NoData { .. } => None,
        }
    }
}

/// Degree distribution line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub log_scale: bool,
}

/// Sorts a degree histogram numerically. Non-numeric keys are dropped.
pub fn degree_series(
    histogram: &BTreeMap<String, f64>,
    title: Option<&str>,
    log_scale: bool,
) -> DegreeSeries {
    let mut points: Vec<(f64, f64)> = histogram
        .iter()
        .filter_map(|(key, count)| match key.trim().parse::<f64>() {
            Ok(degree) if !degree.is_nan() => Some((degree, *count)),
            _ => {
                log::debug!("Dropping non-numeric degree {:?}", key);
                None
            }
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    DegreeSeries {
        title: title.unwrap_or(DEFAULT_DEGREE_TITLE).to_string(),
        labels: points.iter().map(|(degree, _)| degree.to_string()).collect(),
        values: points.iter().map(|(_, count)| *count).collect(),
        log_scale,
    }
}

/// One bar of the "datasets per network type" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTypeBar {
    pub network_type: NetworkType,
    pub count: usize,
    /// Dataset list pre-filtered to this type.
    pub href: String,
}

/// Number of datasets declaring each network type. Types nobody declares
/// are absent.
pub fn count_network_types(datasets: &[DatasetSummary]) -> BTreeMap<NetworkType, usize> {
    let mut counts = BTreeMap::new();
    for network_type in datasets.iter().flat_map(|d| d.network_types.iter()) {
        *counts.entry(*network_type).or_insert(0) += 1;
    }
    counts
}

pub fn network_type_bars(counts: &BTreeMap<NetworkType, usize>) -> Vec<NetworkTypeBar> {
    counts
        .iter()
        .map(|(network_type, count)| NetworkTypeBar {
            network_type: *network_type,
            count: *count,
            href: network_type_href(*network_type),
        })
        .collect()
}

/// A slice of the node label pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSlice {
    pub label: String,
    pub count: f64,
}

/// Label counts as pie slices in label order. Negative or non-finite counts
/// are left out.
pub fn label_slices(labels: &BTreeMap<String, f64>) -> Vec<LabelSlice> {
    labels
        .iter()
        .filter(|(_, count)| count.is_finite() && **count >= 0.0)
        .map(|(label, count)| LabelSlice {
            label: label.clone(),
            count: *count,
        })
        .collect()
}

/// A bar of the simplex-count chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeBar {
    pub label: String,
    pub count: f64,
}

/// Display name of the simplices of dimension `dim`.
pub fn dimension_label(dim: usize) -> String {
    const NAMES: [&str; 4] = ["Vertices", "Edges", "Triangles", "Tetrahedra"];
    match NAMES.get(dim) {
        Some(name) => format!("{} ({}D)", name, dim),
        None => format!("{}-Simplices", dim),
    }
}

pub fn shape_bars(shape: &[f64]) -> Vec<ShapeBar> {
    shape
        .iter()
        .enumerate()
        .map(|(dim, count)| ShapeBar {
            label: dimension_label(dim),
            count: *count,
        })
        .collect()
}
