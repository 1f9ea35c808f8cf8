use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Represents where the datasheet documents were read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSourceType {
    /// One JSON file mapping slug -> front-matter
    File,
    /// A directory holding one `<slug>.json` file per dataset
    Directory,
    /// An in-memory JSON string
    String,
}

/// Raw front-matter documents, sorted by slug
#[derive(Debug, Clone)]
pub struct CatalogLoadResult {
    pub documents: Vec<(String, Value)>,
    pub source_type: CatalogSourceType,
    pub num_documents: usize,
}

impl CatalogLoadResult {
    pub fn new(mut documents: Vec<(String, Value)>, source_type: CatalogSourceType) -> Self {
        documents.sort_by(|a, b| a.0.cmp(&b.0));
        let num_documents = documents.len();
        Self {
            documents,
            source_type,
            num_documents,
        }
    }

    /// `(slug, document)` pairs in slug order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.documents.iter().map(|(slug, doc)| (slug.as_str(), doc))
    }
}

/// Unified interface for loading datasheet front-matter
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load documents from a file or a directory
    pub fn load_from_path(path: &Path) -> Result<CatalogLoadResult> {
        if path.is_dir() {
            Self::load_from_directory(path)
        } else {
            Self::load_from_json_file(path)
        }
    }

    /// Load documents from a JSON file mapping slug -> front-matter
    pub fn load_from_json_file(path: &Path) -> Result<CatalogLoadResult> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let documents = Self::documents_from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        Ok(CatalogLoadResult::new(documents, CatalogSourceType::File))
    }

    /// Load documents from a JSON string mapping slug -> front-matter
    pub fn load_from_json_str(json_str: &str) -> Result<CatalogLoadResult> {
        let documents =
            Self::documents_from_str(json_str).context("Failed to parse catalog JSON string")?;

        Ok(CatalogLoadResult::new(documents, CatalogSourceType::String))
    }

    /// Load every `<slug>.json` file in `dir`; other files are ignored
    pub fn load_from_directory(dir: &Path) -> Result<CatalogLoadResult> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read catalog directory: {}", dir.display()))?;

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list catalog directory: {}", dir.display()))?
                .path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json || !path.is_file() {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
                log::warn!("Skipping datasheet with non UTF-8 name: {}", path.display());
                continue;
            };

            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read datasheet: {}", path.display()))?;
            let document: Value = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in datasheet: {}", path.display()))?;
            documents.push((slug.to_string(), document));
        }

        log::debug!("Read {} datasheets from {}", documents.len(), dir.display());
        Ok(CatalogLoadResult::new(documents, CatalogSourceType::Directory))
    }

    fn documents_from_str(json_str: &str) -> Result<Vec<(String, Value)>> {
        let value: Value = serde_json::from_str(json_str).with_context(|| {
            let preview: String = json_str.chars().take(200).collect();
            format!("Invalid JSON syntax. First 200 chars: {}", preview)
        })?;

        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => anyhow::bail!(
                "Catalog JSON must be an object mapping slugs to front-matter, found {}",
                json_type_name(&other)
            ),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
