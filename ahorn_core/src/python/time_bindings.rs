use pyo3::prelude::*;
use std::collections::BTreeMap;

use super::{parse_json, to_json};
use crate::time::buckets::{aggregate, TimeUnit};

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SeriesInput {
    Scalar(BTreeMap<String, f64>),
    Stacked(BTreeMap<String, Vec<f64>>),
}

/// Sums date-stamped values into buckets of `unit`.
///
/// `data_json` maps date stamps to numbers or to lists of numbers; the
/// result has the same shape, keyed by bucket start in chronological order.
#[pyfunction]
#[pyo3(name = "aggregate_time_series")]
pub fn py_aggregate_time_series(data_json: &str, unit: &str) -> PyResult<String> {
    let unit: TimeUnit = unit
        .parse()
        .map_err(pyo3::exceptions::PyValueError::new_err)?;

    match parse_json::<SeriesInput>(data_json)? {
        SeriesInput::Scalar(data) => to_json(&aggregate(&data, unit)),
        SeriesInput::Stacked(data) => to_json(&aggregate(&data, unit)),
    }
}
