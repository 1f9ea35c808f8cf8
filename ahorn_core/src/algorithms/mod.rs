//! Statistical algorithms behind the chart components.
//!
//! # Components
//!
//! - [`box_plot`]: Five-number summaries from raw samples or histograms
//!
//! # Example
//!
//! ```
//! use ahorn_core::algorithms::{BoxPlotStats, Histogram};
//!
//! let degrees = Histogram::from_string_keys([("1", 2.0), ("2", 1.0), ("3", 3.0)]);
//! let stats = BoxPlotStats::from_histogram(&degrees).expect("non-empty histogram");
//! assert_eq!(stats.median, 2.5);
//! ```

pub mod box_plot;

pub use box_plot::{BoxPlotStats, Histogram};
