//! Python bindings for the catalog core.
//!
//! This module exposes the chart statistics, the temporal bucketing and the
//! dataset filter to Python via PyO3. Every function takes and returns JSON
//! strings so the Python side needs no wrapper classes.
//!
//! # Modules
//!
//! - [`algorithms`]: Box plot summaries
//! - [`time_bindings`]: Temporal aggregation
//! - [`transformations`]: Dataset filtering from a query string
//! - [`preprocessing`]: Datasheet linting
//!
//! # Python API
//!
//! All functions are available in the `ahorn_core` Python module after
//! installation with the `python` feature enabled.

use pyo3::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod algorithms;
pub mod preprocessing;
pub mod time_bindings;
pub mod transformations;

pub use algorithms::*;
pub use preprocessing::*;
pub use time_bindings::*;
pub use transformations::*;

fn parse_json<T: DeserializeOwned>(json: &str) -> PyResult<T> {
    serde_json::from_str(json).map_err(|e| {
        pyo3::exceptions::PyValueError::new_err(format!("Failed to parse JSON: {}", e))
    })
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| {
        pyo3::exceptions::PyRuntimeError::new_err(format!("Failed to serialize result: {}", e))
    })
}
