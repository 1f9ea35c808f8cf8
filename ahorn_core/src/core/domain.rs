//! Domain models for catalogued higher-order network datasets.
//!
//! This module provides the core data structures that the rest of the crate
//! consumes: the per-dataset summary used by the dataset table, the full
//! dataset record used by dataset pages, and the loosely shaped statistics
//! object embedded in each datasheet.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Kind of higher-order network a dataset can be viewed as.
///
/// The declaration order is the canonical order used when listing types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkType {
    SimplicialComplex,
    CellComplex,
    CombinatorialComplex,
    Hypergraph,
}

impl NetworkType {
    /// All network types in canonical order.
    pub const ALL: [NetworkType; 4] = [
        NetworkType::SimplicialComplex,
        NetworkType::CellComplex,
        NetworkType::CombinatorialComplex,
        NetworkType::Hypergraph,
    ];

    /// Wire spelling of this network type.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::SimplicialComplex => "simplicial-complex",
            NetworkType::CellComplex => "cell-complex",
            NetworkType::CombinatorialComplex => "combinatorial-complex",
            NetworkType::Hypergraph => "hypergraph",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown network type: {}", s))
    }
}

/// Inclusive range of node counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRange {
    pub min: u64,
    pub max: u64,
}

impl NodeRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps both ends into `bounds`, swapping them if they end up inverted.
    pub fn clamped_to(&self, bounds: NodeRange) -> NodeRange {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(bounds.min, bounds.max);
        if min <= max {
            NodeRange::new(min, max)
        } else {
            NodeRange::new(max, min)
        }
    }
}

/// Catalog record describing one dataset's identity and headline statistics.
///
/// This is the row type of the dataset table. Tags and network types are
/// held in ordered sets so that display order is deterministic.
///
/// # Examples
///
/// ```
/// use ahorn_core::core::domain::{DatasetSummary, NetworkType};
///
/// let summary = DatasetSummary::new("karate-club", "Karate Club")
///     .with_tags(["social", "small"])
///     .with_network_types([NetworkType::SimplicialComplex])
///     .with_num_nodes(34);
///
/// assert!(summary.has_all_tags(&["social".to_string()].into()));
/// assert_eq!(summary.num_nodes, 34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, rename = "networkType")]
    pub network_types: BTreeSet<NetworkType>,
    #[serde(default)]
    pub num_nodes: u64,
}

impl DatasetSummary {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            tags: BTreeSet::new(),
            network_types: BTreeSet::new(),
            num_nodes: 0,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_network_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = NetworkType>,
    {
        self.network_types = types.into_iter().collect();
        self
    }

    pub fn with_num_nodes(mut self, num_nodes: u64) -> Self {
        self.num_nodes = num_nodes;
        self
    }

    /// Superset test used by the tag filter.
    pub fn has_all_tags(&self, selected: &BTreeSet<String>) -> bool {
        selected.is_subset(&self.tags)
    }

    /// Superset test used by the network type filter.
    pub fn has_all_network_types(&self, selected: &BTreeSet<NetworkType>) -> bool {
        selected.is_subset(&self.network_types)
    }
}

/// A single value of a datasheet's `statistics` object.
///
/// Datasheets are hand-written, so anything that is not a number, a list of
/// numbers or a value-to-count mapping is kept as [`StatValue::Other`] rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Values(Vec<f64>),
    Histogram(BTreeMap<String, f64>),
    Other(serde_json::Value),
}

/// The `statistics` object of a datasheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetStatistics(pub BTreeMap<String, StatValue>);

impl DatasetStatistics {
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            StatValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// `numNodes` coerced to a non-negative integer, 0 when absent.
    pub fn num_nodes(&self) -> u64 {
        match self.number("numNodes") {
            Some(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
            _ => 0,
        }
    }

    pub fn num_edges(&self) -> u64 {
        match self.number("numEdges") {
            Some(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
            _ => 0,
        }
    }
}

/// A downloadable file attached to a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub size: u64,
}

/// Simplex counts of a dataset, either static or per time stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shape {
    Static(Vec<f64>),
    Temporal(BTreeMap<String, Vec<f64>>),
}

/// Full dataset record, as shown on a dataset page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRecord {
    pub summary: DatasetSummary,
    pub source: Option<String>,
    pub license: Option<String>,
    pub citation: Option<String>,
    pub related: Vec<String>,
    pub attachments: BTreeMap<String, Attachment>,
    pub statistics: DatasetStatistics,
    pub label_count: BTreeMap<String, f64>,
    pub edge_label_count: BTreeMap<String, f64>,
    pub shape: Option<Shape>,
}

impl DatasetRecord {
    pub fn slug(&self) -> &str {
        &self.summary.slug
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }
}
