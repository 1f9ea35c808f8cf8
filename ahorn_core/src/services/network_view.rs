//! Summary tabs of a dataset page: the graph view and, when the datasheet
//! has a static shape, the simplicial-complex view.

use serde::Serialize;

use crate::core::domain::{DatasetRecord, Shape, StatValue};
use crate::error::{CatalogError, CatalogResult};
use crate::services::distributions::{shape_bars, BoxPlotView, ShapeBar};

/// Label of the tab bar holding the network views.
pub const DOMAIN_TYPE_LABEL: &str = "Domain Type";

/// Statistics shown on the graph tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub num_nodes: u64,
    pub num_edges: u64,
    /// `2E / (N(N-1))`, absent for fewer than two nodes.
    pub density: Option<f64>,
    pub node_degrees: Option<BoxPlotView>,
}

impl GraphStats {
    pub fn from_record(record: &DatasetRecord) -> Self {
        let num_nodes = record.statistics.num_nodes();
        let num_edges = record.statistics.num_edges();
        let node_degrees = match record.statistics.get("nodeDegrees") {
            Some(value @ StatValue::Histogram(_)) => Some(BoxPlotView::from_stat(
                "node degree",
                Some("Node Degree"),
                Some(value),
            )),
            _ => None,
        };

        Self {
            num_nodes,
            num_edges,
            density: density(num_nodes, num_edges),
            node_degrees,
        }
    }
}

pub fn density(num_nodes: u64, num_edges: u64) -> Option<f64> {
    if num_nodes < 2 {
        return None;
    }
    let n = num_nodes as f64;
    Some(2.0 * num_edges as f64 / (n * (n - 1.0)))
}

/// Statistics shown on the simplicial-complex tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplicialStats {
    pub num_nodes: f64,
    pub num_edges: f64,
    pub total_simplices: f64,
    pub max_dimension: usize,
    pub bars: Vec<ShapeBar>,
}

impl SimplicialStats {
    /// `None` for an empty shape vector.
    pub fn from_shape(shape: &[f64]) -> Option<Self> {
        let max_dimension = shape.len().checked_sub(1)?;
        Some(Self {
            num_nodes: shape[0],
            num_edges: shape.get(1).copied().unwrap_or(0.0),
            total_simplices: shape.iter().sum(),
            max_dimension,
            bars: shape_bars(shape),
        })
    }
}

/// A tab bar whose labels and panels line up one to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabLayout<T> {
    pub label: String,
    tabs: Vec<(String, T)>,
}

impl<T> TabLayout<T> {
    /// Pairs `labels` with `panels`. Mismatched counts are a programming
    /// error and fail immediately.
    pub fn new(label: impl Into<String>, labels: Vec<String>, panels: Vec<T>) -> CatalogResult<Self> {
        if labels.len() != panels.len() {
            return Err(CatalogError::Configuration(format!(
                "Number of tabs ({}) must match number of panels ({})",
                labels.len(),
                panels.len()
            )));
        }
        Ok(Self {
            label: label.into(),
            tabs: labels.into_iter().zip(panels).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|(label, _)| label.as_str())
    }

    pub fn panel(&self, index: usize) -> Option<&T> {
        self.tabs.get(index).map(|(_, panel)| panel)
    }
}

/// Panel content of the network view tabs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NetworkPanel {
    Graph(GraphStats),
    SimplicialComplex(SimplicialStats),
}

/// Builds the "Domain Type" tabs for a dataset page.
pub fn network_view_tabs(record: &DatasetRecord) -> CatalogResult<TabLayout<NetworkPanel>> {
    let mut labels = vec!["Graph".to_string()];
    let mut panels = vec![NetworkPanel::Graph(GraphStats::from_record(record))];

    if let Some(Shape::Static(shape)) = &record.shape {
        if let Some(stats) = SimplicialStats::from_shape(shape) {
            labels.push("Simplicial Complex".to_string());
            panels.push(NetworkPanel::SimplicialComplex(stats));
        }
    }

    TabLayout::new(DOMAIN_TYPE_LABEL, labels, panels)
}
