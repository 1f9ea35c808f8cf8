//! Service layer producing view-models for the presentation layer.
//!
//! Services sit between the pure transformations and whatever renders the
//! site. They own interaction state (the dataset table, the temporal charts)
//! and turn datasheet values into chart-ready structures.

pub mod dataset_table;
pub mod distributions;
pub mod network_view;
pub mod timeline;

pub use dataset_table::{DatasetTable, QueryStringSink, TableRows, NO_RESULTS_MESSAGE};
pub use distributions::{
    count_network_types, degree_series, label_slices, network_type_bars, shape_bars, BoxPlotLayout,
    BoxPlotView, DegreeSeries, LabelSlice, NetworkTypeBar, ShapeBar,
};
pub use network_view::{network_view_tabs, GraphStats, NetworkPanel, SimplicialStats, TabLayout};
pub use timeline::{RankSeries, StackedSeries, TemporalChart, TimeSeries};
