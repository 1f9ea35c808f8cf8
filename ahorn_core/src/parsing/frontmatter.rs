//! Datasheet front-matter decoding.
//!
//! Datasheets are written by hand, so every field has an explicit default:
//! missing or `null` collections are empty, the title falls back to the slug
//! and `statistics.numNodes` falls back to 0. Unknown network types are
//! dropped. Anything else that does not fit the expected shape is a parse
//! error naming the offending field path.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::domain::{
    Attachment, DatasetRecord, DatasetStatistics, DatasetSummary, NetworkType, Shape,
};
use crate::error::{CatalogError, CatalogResult};

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any list of strings and keeps the known network types.
fn deserialize_network_types<'de, D>(deserializer: D) -> Result<BTreeSet<NetworkType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = nullable(deserializer)?;
    Ok(raw
        .iter()
        .filter_map(|value| match value.parse::<NetworkType>() {
            Ok(network_type) => Some(network_type),
            Err(e) => {
                log::debug!("Dropping front-matter network type: {}", e);
                None
            }
        })
        .collect())
}

/// Typed front-matter of one datasheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub disable: bool,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    /// Raw BibTeX, passed through untouched.
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_network_types")]
    pub network_type: BTreeSet<NetworkType>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: BTreeSet<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub related: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub attachments: BTreeMap<String, Attachment>,
    #[serde(default, deserialize_with = "nullable")]
    pub statistics: DatasetStatistics,
    #[serde(default, deserialize_with = "nullable")]
    pub label_count: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub edge_label_count: BTreeMap<String, f64>,
    #[serde(default)]
    pub shape: Option<Shape>,
}

impl FrontMatter {
    pub fn is_disabled(&self) -> bool {
        self.disable
    }

    /// Table row for this datasheet.
    pub fn summary(&self, slug: &str) -> DatasetSummary {
        let title = match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => slug.to_string(),
        };

        DatasetSummary::new(slug, title)
            .with_tags(self.tags.iter().cloned())
            .with_network_types(self.network_type.iter().copied())
            .with_num_nodes(self.statistics.num_nodes())
    }

    pub fn into_record(self, slug: &str) -> DatasetRecord {
        let summary = self.summary(slug);
        DatasetRecord {
            summary,
            source: self.source,
            license: self.license,
            citation: self.citation,
            related: self.related,
            attachments: self.attachments,
            statistics: self.statistics,
            label_count: self.label_count,
            edge_label_count: self.edge_label_count,
            shape: self.shape,
        }
    }
}

/// Parses front-matter given as JSON text.
pub fn parse_front_matter_str(slug: &str, json: &str) -> CatalogResult<FrontMatter> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(deserializer).map_err(|e| with_slug(slug, e))
}

/// Parses front-matter that is already a JSON value.
pub fn parse_front_matter_value(slug: &str, value: &serde_json::Value) -> CatalogResult<FrontMatter> {
    serde_path_to_error::deserialize(value).map_err(|e| with_slug(slug, e))
}

fn with_slug(slug: &str, err: serde_path_to_error::Error<serde_json::Error>) -> CatalogError {
    match CatalogError::from(err) {
        CatalogError::Parse(message) => {
            CatalogError::Parse(format!("Invalid front-matter for dataset '{}': {}", slug, message))
        }
        other => other,
    }
}
