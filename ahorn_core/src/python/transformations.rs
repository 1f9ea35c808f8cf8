use pyo3::prelude::*;

use super::{parse_json, to_json};
use crate::core::domain::DatasetSummary;
use crate::services::dataset_table::DatasetTable;

/// Filters and sorts dataset summaries by a dataset-list query string.
///
/// Returns `{"rows": [...], "query": "<canonical query string>"}`.
#[pyfunction]
#[pyo3(name = "filter_datasets")]
pub fn py_filter_datasets(datasets_json: &str, query_string: &str) -> PyResult<String> {
    let datasets: Vec<DatasetSummary> = parse_json(datasets_json)?;
    let table = DatasetTable::from_url(datasets, query_string, String::new());

    let rows: Vec<&DatasetSummary> = match table.rows() {
        crate::services::TableRows::Rows(rows) => rows,
        crate::services::TableRows::NoResults => Vec::new(),
    };
    to_json(&serde_json::json!({
        "rows": rows,
        "query": table.query_string(),
    }))
}
