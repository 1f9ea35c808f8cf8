use pyo3::prelude::*;
use serde_json::{Map, Value};

use super::{parse_json, to_json};
use crate::preprocessing::validator::DatasheetLinter;

/// Lints a JSON object mapping slugs to front-matter.
///
/// Returns the list of issues, each `{"slug", "key", "message"}`.
#[pyfunction]
#[pyo3(name = "lint_datasheets")]
pub fn py_lint_datasheets(catalog_json: &str) -> PyResult<String> {
    let documents: Map<String, Value> = parse_json(catalog_json)?;
    let report = DatasheetLinter::lint_all(documents.iter().map(|(k, v)| (k.as_str(), v)));
    to_json(&report.issues())
}
