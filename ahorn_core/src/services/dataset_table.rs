//! Stateful controller behind the dataset table.
//!
//! [`DatasetTable`] owns the dataset collection and the current [`ViewQuery`].
//! Every state change goes through [`DatasetTable::dispatch`], which applies
//! the action and then writes the canonical query string to a
//! [`QueryStringSink`]. The URL is only read once, when the table is created.
//!
//! # Example
//!
//! ```
//! use ahorn_core::core::domain::DatasetSummary;
//! use ahorn_core::services::dataset_table::{DatasetTable, TableRows};
//! use ahorn_core::transformations::QueryAction;
//!
//! let datasets = vec![
//!     DatasetSummary::new("karate-club", "Karate Club").with_num_nodes(34),
//!     DatasetSummary::new("walmart-trips", "Walmart Trips").with_num_nodes(88_860),
//! ];
//!
//! let mut table = DatasetTable::from_url(datasets, "?search=karate", String::new());
//! assert_eq!(table.rows().len(), 1);
//!
//! table.dispatch(QueryAction::SetSearch("zebra".into()));
//! assert!(matches!(table.rows(), TableRows::NoResults));
//! assert_eq!(table.sink(), "search=zebra");
//! ```

use serde::Serialize;

use crate::core::domain::{DatasetSummary, NetworkType, NodeRange};
use crate::transformations::filtering::{all_tags, filter_and_sort, node_extremes};
use crate::transformations::query::{QueryAction, SortField, ViewQuery};
use crate::transformations::query_string::{decode_query, encode_query};
use crate::transformations::range_selector::RangeSelector;

/// Text of the placeholder row shown when nothing matches.
pub const NO_RESULTS_MESSAGE: &str = "No datasets found matching your search and filter.";

/// Receives the canonical query string after every state change.
///
/// Implementations replace the whole query string in one call; the table
/// never hands out a partially built string.
pub trait QueryStringSink {
    fn replace_query(&mut self, query_string: &str);
}

/// Keeps only the latest query string.
impl QueryStringSink for String {
    fn replace_query(&mut self, query_string: &str) {
        self.clear();
        self.push_str(query_string);
    }
}

/// Records every write, oldest first.
impl QueryStringSink for Vec<String> {
    fn replace_query(&mut self, query_string: &str) {
        self.push(query_string.to_string());
    }
}

/// Rows to render for the current query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "camelCase")]
pub enum TableRows<'a> {
    Rows(Vec<&'a DatasetSummary>),
    /// Nothing matched; render a single [`NO_RESULTS_MESSAGE`] row.
    NoResults,
}

impl<'a> TableRows<'a> {
    fn from_rows(rows: Vec<&'a DatasetSummary>) -> Self {
        if rows.is_empty() {
            TableRows::NoResults
        } else {
            TableRows::Rows(rows)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableRows::Rows(rows) => rows.len(),
            TableRows::NoResults => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableRows::NoResults)
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            TableRows::Rows(_) => None,
            TableRows::NoResults => Some(NO_RESULTS_MESSAGE),
        }
    }
}

/// Filter, sort and URL-sync controller for the dataset table.
pub struct DatasetTable<S: QueryStringSink> {
    datasets: Vec<DatasetSummary>,
    extremes: NodeRange,
    query: ViewQuery,
    /// Set when the node range came from the URL or the user, cleared by
    /// [`QueryAction::ResetRange`]. An unpinned range follows the extremes.
    range_pinned: bool,
    sink: S,
}

impl<S: QueryStringSink> DatasetTable<S> {
    /// Creates a table in its default state.
    pub fn new(datasets: Vec<DatasetSummary>, sink: S) -> Self {
        Self::from_url(datasets, "", sink)
    }

    /// Creates a table seeded from the page's query string.
    pub fn from_url(datasets: Vec<DatasetSummary>, query_string: &str, sink: S) -> Self {
        let extremes = node_extremes(&datasets);
        let decoded = decode_query(query_string, extremes);
        log::debug!(
            "Dataset table seeded with {} datasets, node range {}..={}",
            datasets.len(),
            decoded.query.node_range.min,
            decoded.query.node_range.max
        );

        Self {
            datasets,
            extremes,
            query: decoded.query,
            range_pinned: decoded.range_from_url,
            sink,
        }
    }

    /// Applies `action` and writes the resulting query string to the sink.
    pub fn dispatch(&mut self, action: QueryAction) -> &ViewQuery {
        match action {
            QueryAction::SetNodeRange { .. } => self.range_pinned = true,
            QueryAction::ResetRange => self.range_pinned = false,
            _ => {}
        }

        let next = self.query.clone().apply(action, self.extremes);
        self.query = next;
        self.sync_url();
        &self.query
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> &ViewQuery {
        self.dispatch(QueryAction::SetSearch(text.into()))
    }

    pub fn toggle_tag(&mut self, tag: impl Into<String>) -> &ViewQuery {
        self.dispatch(QueryAction::ToggleTag(tag.into()))
    }

    pub fn toggle_network_type(&mut self, network_type: NetworkType) -> &ViewQuery {
        self.dispatch(QueryAction::ToggleNetworkType(network_type))
    }

    pub fn set_node_range(&mut self, min: u64, max: u64) -> &ViewQuery {
        self.dispatch(QueryAction::SetNodeRange { min, max })
    }

    pub fn set_sort(&mut self, field: SortField) -> &ViewQuery {
        self.dispatch(QueryAction::SetSort(field))
    }

    pub fn reset_search(&mut self) -> &ViewQuery {
        self.dispatch(QueryAction::ResetSearch)
    }

    pub fn reset_range(&mut self) -> &ViewQuery {
        self.dispatch(QueryAction::ResetRange)
    }

    pub fn reset_tags(&mut self) -> &ViewQuery {
        self.dispatch(QueryAction::ResetTags)
    }

    pub fn reset_network_types(&mut self) -> &ViewQuery {
        self.dispatch(QueryAction::ResetNetworkTypes)
    }

    /// Replaces the dataset collection.
    ///
    /// The extremes are recomputed. A range that was never pinned snaps to the
    /// new extremes; a pinned one is clamped into them.
    pub fn set_datasets(&mut self, datasets: Vec<DatasetSummary>) {
        self.datasets = datasets;
        self.extremes = node_extremes(&self.datasets);
        self.query.node_range = if self.range_pinned {
            self.query.node_range.clamped_to(self.extremes)
        } else {
            self.extremes
        };
        self.sync_url();
    }

    /// Visible rows in display order.
    pub fn rows(&self) -> TableRows<'_> {
        TableRows::from_rows(filter_and_sort(&self.datasets, &self.query))
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn extremes(&self) -> NodeRange {
        self.extremes
    }

    pub fn datasets(&self) -> &[DatasetSummary] {
        &self.datasets
    }

    pub fn is_range_pinned(&self) -> bool {
        self.range_pinned
    }

    /// Tags offered by the tag filter.
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.datasets)
    }

    /// Canonical query string of the current state.
    pub fn query_string(&self) -> String {
        encode_query(&self.query, self.extremes)
    }

    /// Range input positioned on the current node range.
    pub fn range_selector(&self, min_gap: u64) -> RangeSelector {
        RangeSelector::new(self.extremes)
            .with_min_gap(min_gap)
            .with_value(self.query.node_range)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn sync_url(&mut self) {
        let query_string = self.query_string();
        self.sink.replace_query(&query_string);
    }
}
