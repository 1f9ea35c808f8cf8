//! The immutable dataset collection.
//!
//! A [`Catalog`] is built once from datasheet front-matter and never changes
//! afterwards. Disabled datasheets are left out. A process-wide instance can
//! be installed with [`init_global_catalog`] or created on first use with
//! [`global_catalog_or_load`]; concurrent first uses trigger a single load.

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::domain::{Attachment, DatasetRecord, DatasetSummary, NetworkType};
use crate::error::{CatalogError, CatalogResult};
use crate::io::loaders::CatalogLoader;
use crate::parsing::frontmatter::{parse_front_matter_value, FrontMatter};
use crate::services::distributions::{count_network_types, network_type_bars, NetworkTypeBar};
use crate::transformations::filtering::all_tags;

static GLOBAL_CATALOG: OnceCell<Catalog> = OnceCell::new();

/// A related dataset as linked from a dataset page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedDataset {
    pub slug: String,
    pub title: String,
}

/// Entry of the `datasets.json` index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub slug: String,
    pub title: String,
    pub tags: Vec<String>,
    /// Attachment names, e.g. `revision-1`.
    pub attachments: Vec<String>,
}

/// The `datasets.json` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetIndex {
    /// Generation time, ISO 8601 in UTC.
    pub time: String,
    pub datasets: BTreeMap<String, IndexEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, DatasetRecord>,
    summaries: Vec<DatasetSummary>,
}

impl Catalog {
    /// Builds a catalog from typed front-matter.
    pub fn from_front_matter<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (String, FrontMatter)>,
    {
        let mut records = BTreeMap::new();
        for (slug, front_matter) in documents {
            if front_matter.is_disabled() {
                log::warn!("Skipping disabled dataset '{}'", slug);
                continue;
            }
            if records.contains_key(&slug) {
                log::warn!("Skipping duplicate dataset '{}'", slug);
                continue;
            }
            let record = front_matter.into_record(&slug);
            records.insert(slug, record);
        }

        let summaries = records.values().map(|r| r.summary.clone()).collect();
        Self { records, summaries }
    }

    /// Builds a catalog from raw front-matter documents.
    pub fn from_documents<'a, I>(documents: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let parsed = documents
            .into_iter()
            .map(|(slug, document)| -> CatalogResult<(String, FrontMatter)> {
                Ok((slug.to_string(), parse_front_matter_value(slug, document)?))
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        let catalog = Self::from_front_matter(parsed);
        log::info!("Loaded catalog with {} datasets", catalog.len());
        Ok(catalog)
    }

    /// Reads and builds a catalog from a JSON file or a datasheet directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let loaded = CatalogLoader::load_from_path(path)?;
        Self::from_documents(loaded.iter())
            .with_context(|| format!("Failed to build catalog from {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Table rows, in slug order.
    pub fn summaries(&self) -> &[DatasetSummary] {
        &self.summaries
    }

    pub fn get(&self, slug: &str) -> Option<&DatasetRecord> {
        self.records.get(slug)
    }

    pub fn require(&self, slug: &str) -> CatalogResult<&DatasetRecord> {
        self.get(slug)
            .ok_or_else(|| CatalogError::NotFound(format!("Dataset '{}' not found", slug)))
    }

    pub fn records(&self) -> impl Iterator<Item = &DatasetRecord> {
        self.records.values()
    }

    /// Related datasets of `slug`. Unknown slugs are kept, titled by their
    /// slug.
    pub fn related(&self, slug: &str) -> Vec<RelatedDataset> {
        let Some(record) = self.get(slug) else {
            return Vec::new();
        };
        record
            .related
            .iter()
            .map(|related| RelatedDataset {
                slug: related.clone(),
                title: self
                    .get(related)
                    .map(|r| r.title().to_string())
                    .unwrap_or_else(|| related.clone()),
            })
            .collect()
    }

    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.summaries)
    }

    pub fn network_type_counts(&self) -> BTreeMap<NetworkType, usize> {
        count_network_types(&self.summaries)
    }

    /// Bars of the "datasets per network type" chart.
    pub fn network_type_bars(&self) -> Vec<NetworkTypeBar> {
        network_type_bars(&self.network_type_counts())
    }

    /// Attachments of `slug` in name order.
    pub fn attachments(&self, slug: &str) -> Option<&BTreeMap<String, Attachment>> {
        self.get(slug).map(|r| &r.attachments)
    }

    /// The `datasets.json` document generated at `now`.
    pub fn index_document(&self, now: DateTime<Utc>) -> DatasetIndex {
        let datasets = self
            .records
            .iter()
            .map(|(slug, record)| {
                let entry = IndexEntry {
                    slug: slug.clone(),
                    title: record.title().to_string(),
                    tags: record.summary.tags.iter().cloned().collect(),
                    attachments: record.attachments.keys().cloned().collect(),
                };
                (slug.clone(), entry)
            })
            .collect();

        DatasetIndex {
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            datasets,
        }
    }
}

/// Installs the process-wide catalog. Fails if one is already installed.
pub fn init_global_catalog(catalog: Catalog) -> CatalogResult<()> {
    GLOBAL_CATALOG.set(catalog).map_err(|_| {
        CatalogError::Configuration("Global catalog has already been initialized".to_string())
    })
}

/// The process-wide catalog, if one has been installed.
pub fn global_catalog() -> Option<&'static Catalog> {
    GLOBAL_CATALOG.get()
}

/// The process-wide catalog, loading it from `path` on first use.
pub fn global_catalog_or_load(path: &Path) -> anyhow::Result<&'static Catalog> {
    GLOBAL_CATALOG.get_or_try_init(|| Catalog::load(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn catalog() -> Catalog {
        let documents = json!({
            "karate-club": {
                "title": "Karate Club",
                "network-type": ["simplicial-complex"],
                "tags": ["social", "small"],
                "related": ["contact-high-school", "retired-dataset"],
                "attachments": {"revision-1": {"url": "https://example.org/k.gz", "size": 10}},
                "statistics": {"numNodes": 34}
            },
            "contact-high-school": {
                "title": "Contact High School",
                "network-type": ["simplicial-complex", "hypergraph"],
                "tags": ["social", "temporal"],
                "statistics": {"numNodes": 327}
            },
            "draft": {"title": "Draft", "disable": true}
        });
        let map = documents.as_object().unwrap();
        Catalog::from_documents(map.iter().map(|(k, v)| (k.as_str(), v))).unwrap()
    }

    #[test]
    fn test_disabled_datasets_skipped() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("draft").is_none());
        assert!(matches!(catalog.require("draft"), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_summaries_in_slug_order() {
        let catalog = catalog();
        let slugs: Vec<&str> = catalog.summaries().iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["contact-high-school", "karate-club"]);
    }

    #[test]
    fn test_related_falls_back_to_slug() {
        let related = catalog().related("karate-club");
        assert_eq!(
            related,
            vec![
                RelatedDataset {
                    slug: "contact-high-school".into(),
                    title: "Contact High School".into()
                },
                RelatedDataset {
                    slug: "retired-dataset".into(),
                    title: "retired-dataset".into()
                },
            ]
        );
        assert!(catalog().related("missing").is_empty());
    }

    #[test]
    fn test_tags_and_network_types() {
        let catalog = catalog();
        assert_eq!(catalog.all_tags(), vec!["small", "social", "temporal"]);
        let counts = catalog.network_type_counts();
        assert_eq!(counts[&NetworkType::SimplicialComplex], 2);
        assert_eq!(counts[&NetworkType::Hypergraph], 1);
        assert!(!counts.contains_key(&NetworkType::CellComplex));
        assert_eq!(catalog.network_type_bars().len(), 2);
    }

    #[test]
    fn test_index_document() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let index = catalog().index_document(now);
        assert_eq!(index.time, "2025-03-01T12:30:00.000Z");
        assert_eq!(index.datasets.len(), 2);

        let value = serde_json::to_value(&index).unwrap();
        assert_eq!(value["datasets"]["karate-club"]["attachments"], json!(["revision-1"]));
        assert_eq!(value["datasets"]["contact-high-school"]["tags"], json!(["social", "temporal"]));
    }

    #[test]
    fn test_parse_error_propagates() {
        let bad = json!({"tags": "not-a-list"});
        let result = Catalog::from_documents([("bad", &bad)]);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_duplicates_keep_first() {
        let catalog = Catalog::from_front_matter(vec![
            ("a".to_string(), FrontMatter { title: Some("First".into()), ..Default::default() }),
            ("a".to_string(), FrontMatter { title: Some("Second".into()), ..Default::default() }),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().title(), "First");
    }
}
