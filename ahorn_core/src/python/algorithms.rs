use pyo3::prelude::*;
use std::collections::BTreeMap;

use super::{parse_json, to_json};
use crate::algorithms::{BoxPlotStats, Histogram};

/// Five-number summary of a JSON array of numbers.
///
/// Returns the summary as a JSON object, or `null` when the sample is empty.
#[pyfunction]
#[pyo3(name = "compute_box_plot")]
pub fn py_compute_box_plot(values_json: &str) -> PyResult<String> {
    let values: Vec<f64> = parse_json(values_json)?;
    to_json(&BoxPlotStats::from_values(&values))
}

/// Five-number summary of a JSON object mapping values to counts.
#[pyfunction]
#[pyo3(name = "compute_histogram_box_plot")]
pub fn py_compute_histogram_box_plot(histogram_json: &str) -> PyResult<String> {
    let counts: BTreeMap<String, f64> = parse_json(histogram_json)?;
    let histogram = Histogram::from_string_keys(counts.iter().map(|(k, v)| (k.as_str(), *v)));
    to_json(&BoxPlotStats::from_histogram(&histogram))
}
