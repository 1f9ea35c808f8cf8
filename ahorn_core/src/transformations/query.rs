//! Filter and sort state of the dataset table.
//!
//! [`ViewQuery`] is the whole state of the table; it only changes through
//! [`ViewQuery::apply`], which maps the current state and a [`QueryAction`]
//! to the next state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::domain::{NetworkType, NodeRange};

/// Column the table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    NumNodes,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::NumNodes => "numNodes",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "numNodes" => Ok(SortField::NumNodes),
            _ => Err(format!("Invalid sort field: {}. Must be 'title' or 'numNodes'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}. Must be 'asc' or 'desc'", s)),
        }
    }
}

/// A user interaction with the dataset table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    SetSearch(String),
    /// Adds or removes a tag. The empty tag is ignored. Tags are carried in
    /// the URL as a comma-separated list, so a tag containing a comma comes
    /// back split in two after a reload.
    ToggleTag(String),
    ToggleNetworkType(NetworkType),
    SetNodeRange { min: u64, max: u64 },
    /// Flips the direction when the field is already active, otherwise
    /// switches to the field in ascending order.
    SetSort(SortField),
    ResetSearch,
    ResetRange,
    ResetTags,
    ResetNetworkTypes,
}

/// Complete, serialisable filter and sort state of the dataset table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub search: String,
    pub tags: BTreeSet<String>,
    pub network_types: BTreeSet<NetworkType>,
    pub node_range: NodeRange,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl ViewQuery {
    /// Default state for a collection whose node counts span `extremes`.
    pub fn with_defaults(extremes: NodeRange) -> Self {
        Self {
            search: String::new(),
            tags: BTreeSet::new(),
            network_types: BTreeSet::new(),
            node_range: extremes,
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }

    /// Returns the state after `action`. Node ranges are kept inside
    /// `extremes`.
    pub fn apply(mut self, action: QueryAction, extremes: NodeRange) -> Self {
        match action {
            QueryAction::SetSearch(text) => self.search = text,
            QueryAction::ToggleTag(tag) if tag.is_empty() => {
                log::debug!("Ignoring toggle of the empty tag");
            }
            QueryAction::ToggleTag(tag) => {
                if !self.tags.remove(&tag) {
                    self.tags.insert(tag);
                }
            }
            QueryAction::ToggleNetworkType(network_type) => {
                if !self.network_types.remove(&network_type) {
                    self.network_types.insert(network_type);
                }
            }
            QueryAction::SetNodeRange { min, max } => {
                self.node_range = NodeRange::new(min, max).clamped_to(extremes);
            }
            QueryAction::SetSort(field) => {
                if self.sort_field == field {
                    self.sort_direction = self.sort_direction.toggled();
                } else {
                    self.sort_field = field;
                    self.sort_direction = SortDirection::Asc;
                }
            }
            QueryAction::ResetSearch => self.search.clear(),
            QueryAction::ResetRange => self.node_range = extremes,
            QueryAction::ResetTags => self.tags.clear(),
            QueryAction::ResetNetworkTypes => self.network_types.clear(),
        }
        self
    }
}
