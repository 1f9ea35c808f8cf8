//! Dataset table state, filtering and URL synchronisation.
//!
//! # Modules
//!
//! - [`query`]: The table's filter and sort state and the actions that change it
//! - [`filtering`]: Pure filter and stable sort over dataset summaries
//! - [`query_string`]: Encoding of the state into the page URL and back
//! - [`range_selector`]: Two-handle node count input
//!
//! # Example
//!
//! ```
//! use ahorn_core::core::domain::DatasetSummary;
//! use ahorn_core::transformations::{filter_and_sort, node_extremes, QueryAction, ViewQuery};
//!
//! let datasets = vec![
//!     DatasetSummary::new("a", "Alpha").with_num_nodes(10),
//!     DatasetSummary::new("b", "Beta").with_num_nodes(200),
//! ];
//! let extremes = node_extremes(&datasets);
//! let query = ViewQuery::with_defaults(extremes)
//!     .apply(QueryAction::SetNodeRange { min: 50, max: 200 }, extremes);
//!
//! let rows = filter_and_sort(&datasets, &query);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].slug, "b");
//! ```

pub mod filtering;
pub mod query;
pub mod query_string;
pub mod range_selector;

pub use filtering::{all_tags, collate, compare_by, filter_and_sort, matches_query, node_extremes};
pub use query::{QueryAction, SortDirection, SortField, ViewQuery};
pub use query_string::{decode_query, encode_query, network_type_href, DecodedQuery};
pub use range_selector::{RangeSelector, TrackInsets, DEFAULT_MIN_GAP};
