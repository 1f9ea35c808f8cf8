//! AHORN catalogue core.
//!
//! Data layer of the AHORN dataset catalogue: it reads datasheet
//! front-matter, computes the statistics shown on dataset pages and drives
//! the filterable dataset table.
//!
//! # Modules
//!
//! - [`core`]: Dataset domain types
//! - [`algorithms`]: Box plot order statistics
//! - [`time`]: Temporal bucketing of date-stamped series
//! - [`transformations`]: Table query state, filtering, URL sync and the range selector
//! - [`services`]: View-models for the table, charts and network view
//! - [`parsing`]: Datasheet front-matter
//! - [`preprocessing`]: Datasheet linter
//! - [`io`]: Catalog loading and the `datasets.json` index
//! - [`config`]: Site configuration
//! - [`utils`]: Number, file size and attachment formatting
//!
//! # Example
//!
//! ```
//! use ahorn_core::algorithms::BoxPlotStats;
//!
//! let stats = BoxPlotStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.median, 3.0);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod time;
pub mod transformations;
pub mod utils;

#[cfg(feature = "python")]
pub mod python;

pub use error::{CatalogError, CatalogResult};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// AHORN catalogue core for the Python build scripts
#[cfg(feature = "python")]
#[pymodule]
fn ahorn_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Chart statistics
    m.add_function(wrap_pyfunction!(python::py_compute_box_plot, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_compute_histogram_box_plot, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_aggregate_time_series, m)?)?;

    // Dataset table and datasheets
    m.add_function(wrap_pyfunction!(python::py_filter_datasets, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_lint_datasheets, m)?)?;

    Ok(())
}
