//! Datasheet linting with per-key issue reporting.
//!
//! This module checks datasheet front-matter for required keys, canonical
//! key order, the network-type list and the attachment revisions. It works
//! on the raw JSON document (key order preserved) rather than on the typed
//! front-matter, since ordering and shape problems are exactly what the
//! typed form hides.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use url::Url;

use crate::core::domain::NetworkType;

/// Keys every datasheet must define.
pub const REQUIRED_KEYS: [&str; 3] = ["title", "source", "network-type"];

/// Canonical order of the known front-matter keys.
pub const KEY_ORDER: [&str; 13] = [
    "title",
    "disable",
    "source",
    "license",
    "citation",
    "network-type",
    "tags",
    "related",
    "attachments",
    "statistics",
    "label-count",
    "edge-label-count",
    "shape",
];

const REVISION_PREFIX: &str = "revision-";

/// One problem found in a datasheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LintIssue {
    pub slug: String,
    /// Front-matter key the issue concerns.
    pub key: String,
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.slug, self.key, self.message)
    }
}

/// Issues collected over one or more datasheets.
///
/// # Examples
///
/// ```
/// use ahorn_core::preprocessing::validator::LintReport;
///
/// let mut report = LintReport::new();
/// assert!(report.is_clean());
///
/// report.add_issue("karate-club", "title", "Missing required key 'title'.");
/// assert!(!report.is_clean());
/// assert_eq!(report.issues().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintReport {
    issues: Vec<LintIssue>,
    documents: usize,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, slug: &str, key: &str, message: impl Into<String>) {
        self.issues.push(LintIssue {
            slug: slug.to_string(),
            key: key.to_string(),
            message: message.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[LintIssue] {
        &self.issues
    }

    /// Number of datasheets checked.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Issues sorted by slug, key and message, one per line, after a count
    /// header.
    pub fn render(&self) -> String {
        let mut sorted = self.issues.clone();
        sorted.sort();

        let mut out = format!("Found {} frontmatter issue(s):\n", sorted.len());
        for issue in &sorted {
            out.push_str(&issue.to_string());
            out.push('\n');
        }
        out
    }
}

/// Linter for datasheet front-matter.
pub struct DatasheetLinter;

impl DatasheetLinter {
    /// Lints a collection of `(slug, front-matter)` documents.
    pub fn lint_all<'a, I>(documents: I) -> LintReport
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut report = LintReport::new();
        for (slug, document) in documents {
            Self::lint_document(slug, document, &mut report);
        }
        report
    }

    /// Lints one datasheet, appending its issues to `report`.
    pub fn lint_document(slug: &str, document: &Value, report: &mut LintReport) {
        report.documents += 1;

        let Some(fields) = document.as_object() else {
            report.add_issue(slug, "", "Front-matter must be a mapping.");
            return;
        };

        for key in REQUIRED_KEYS {
            if !fields.contains_key(key) {
                report.add_issue(slug, key, format!("Missing required key '{}'.", key));
            }
        }

        Self::check_key_order(slug, fields, report);

        if let Some(network_types) = fields.get("network-type") {
            Self::check_network_types(slug, network_types, report);
        }
        if let Some(attachments) = fields.get("attachments") {
            Self::check_attachments(slug, attachments, report);
        }
    }

    fn check_key_order(slug: &str, fields: &Map<String, Value>, report: &mut LintReport) {
        let mut last: Option<(usize, &str)> = None;
        for key in fields.keys() {
            let Some(index) = KEY_ORDER.iter().position(|known| known == key) else {
                continue;
            };
            match last {
                Some((last_index, last_key)) if index < last_index => {
                    report.add_issue(
                        slug,
                        key,
                        format!("Key '{}' is out of order; expected before '{}'.", key, last_key),
                    );
                }
                _ => last = Some((index, key.as_str())),
            }
        }
    }

    fn check_network_types(slug: &str, value: &Value, report: &mut LintReport) {
        const KEY: &str = "network-type";

        let Some(values) = value.as_array() else {
            report.add_issue(slug, KEY, "Key 'network-type' must be a list of values.");
            return;
        };
        if values.is_empty() {
            report.add_issue(slug, KEY, "Key 'network-type' must list at least one value.");
            return;
        }

        let allowed = NetworkType::ALL.map(|t| t.as_str()).join(", ");
        let mut last: Option<NetworkType> = None;
        for value in values {
            let parsed = value.as_str().and_then(|s| s.parse::<NetworkType>().ok());
            let Some(network_type) = parsed else {
                let shown = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                report.add_issue(
                    slug,
                    KEY,
                    format!("Invalid network-type '{}'. Allowed values: {}.", shown, allowed),
                );
                continue;
            };
            match last {
                Some(previous) if network_type < previous => {
                    report.add_issue(
                        slug,
                        KEY,
                        format!(
                            "Network-type values must follow the predefined order; '{}' should appear after '{}'.",
                            network_type, previous
                        ),
                    );
                }
                _ => last = Some(network_type),
            }
        }
    }

    fn check_attachments(slug: &str, value: &Value, report: &mut LintReport) {
        const KEY: &str = "attachments";

        let Some(attachments) = value.as_object() else {
            report.add_issue(slug, KEY, "attachments must be a mapping of attachment entries.");
            return;
        };

        for (name, attachment) in attachments {
            let Some(entry) = attachment.as_object() else {
                report.add_issue(slug, KEY, "Each attachments entry must be a mapping.");
                continue;
            };
            let Some(url) = entry.get("url") else {
                report.add_issue(slug, KEY, "Each attachment must include an 'url' field.");
                continue;
            };
            if !url.as_str().is_some_and(is_full_https_url) {
                report.add_issue(
                    slug,
                    KEY,
                    format!("attachments.{}.url must be a full https URL.", name),
                );
            }
        }

        let revision_keys: Vec<&String> = attachments
            .keys()
            .filter(|name| name.starts_with(REVISION_PREFIX))
            .collect();
        if revision_keys.is_empty() {
            report.add_issue(
                slug,
                KEY,
                "Attachments must include at least one revision entry (e.g., revision-1).",
            );
            return;
        }

        let mut numbers: Vec<u64> = Vec::with_capacity(revision_keys.len());
        for name in revision_keys {
            match name[REVISION_PREFIX.len()..].parse::<u64>() {
                Ok(number) => numbers.push(number),
                Err(_) => report.add_issue(
                    slug,
                    KEY,
                    format!(
                        "Invalid revision key format: '{}'. Expected format: revision-N where N is a number.",
                        name
                    ),
                ),
            }
        }
        if numbers.is_empty() {
            return;
        }

        numbers.sort_unstable();
        if numbers[0] != 1 {
            report.add_issue(slug, KEY, "Revisions must start with revision-1.");
        }
        let expected: Vec<u64> = (1..=numbers.len() as u64).collect();
        if numbers != expected {
            report.add_issue(
                slug,
                KEY,
                format!(
                    "Revisions must be consecutive. Found: {:?}, expected: {:?}.",
                    numbers, expected
                ),
            );
        }
    }
}

fn is_full_https_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| url.scheme() == "https" && url.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lint(document: Value) -> Vec<LintIssue> {
        let mut report = LintReport::new();
        DatasheetLinter::lint_document("test", &document, &mut report);
        report.issues().to_vec()
    }

    fn messages(document: Value) -> Vec<String> {
        lint(document).into_iter().map(|issue| issue.message).collect()
    }

    fn valid() -> Value {
        json!({
            "title": "Karate Club",
            "source": "https://example.org",
            "network-type": ["simplicial-complex", "hypergraph"],
            "tags": ["social"],
            "attachments": {
                "revision-1": {"url": "https://example.org/a.gz", "size": 10},
                "revision-2": {"url": "https://example.org/b.gz"}
            }
        })
    }

    #[test]
    fn test_valid_document() {
        assert!(lint(valid()).is_empty());
    }

    #[test]
    fn test_missing_required_keys() {
        let issues = lint(json!({"tags": []}));
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["title", "source", "network-type"]);
    }

    #[test]
    fn test_key_order() {
        let document: Value = serde_json::from_str(
            r#"{"source": "s", "title": "t", "network-type": ["hypergraph"], "custom": 1, "license": "MIT"}"#,
        )
        .unwrap();
        assert_eq!(
            messages(document),
            vec![
                "Key 'title' is out of order; expected before 'source'.",
                "Key 'license' is out of order; expected before 'network-type'.",
            ]
        );
    }

    #[test]
    fn test_network_type_checks() {
        let mut document = valid();
        document["network-type"] = json!("hypergraph");
        assert_eq!(
            messages(document),
            vec!["Key 'network-type' must be a list of values."]
        );

        let mut document = valid();
        document["network-type"] = json!([]);
        assert_eq!(
            messages(document),
            vec!["Key 'network-type' must list at least one value."]
        );

        let mut document = valid();
        document["network-type"] = json!(["hypergraph", "graph", "cell-complex"]);
        let found = messages(document);
        assert_eq!(found.len(), 2);
        assert!(found[0].starts_with("Invalid network-type 'graph'."));
        assert_eq!(
            found[1],
            "Network-type values must follow the predefined order; 'cell-complex' should appear after 'hypergraph'."
        );
    }

    #[test]
    fn test_attachment_urls() {
        let mut document = valid();
        document["attachments"]["revision-2"] = json!({"url": "http://example.org/b.gz"});
        document["attachments"]["readme"] = json!("notes.txt");
        document["attachments"]["extra"] = json!({"size": 3});
        let found = messages(document);
        assert!(found.contains(&"attachments.revision-2.url must be a full https URL.".to_string()));
        assert!(found.contains(&"Each attachments entry must be a mapping.".to_string()));
        assert!(found.contains(&"Each attachment must include an 'url' field.".to_string()));
    }

    #[test]
    fn test_revision_checks() {
        let mut document = valid();
        document["attachments"] = json!({"data": {"url": "https://example.org/x"}});
        assert_eq!(
            messages(document),
            vec!["Attachments must include at least one revision entry (e.g., revision-1)."]
        );

        let mut document = valid();
        document["attachments"] = json!({
            "revision-2": {"url": "https://example.org/x"},
            "revision-4": {"url": "https://example.org/y"},
            "revision-final": {"url": "https://example.org/z"}
        });
        let found = messages(document);
        assert_eq!(found.len(), 3);
        assert!(found[0].starts_with("Invalid revision key format: 'revision-final'."));
        assert_eq!(found[1], "Revisions must start with revision-1.");
        assert_eq!(
            found[2],
            "Revisions must be consecutive. Found: [2, 4], expected: [1, 2]."
        );
    }

    #[test]
    fn test_render_sorted() {
        let mut report = LintReport::new();
        report.add_issue("walmart-trips", "title", "b");
        report.add_issue("karate-club", "source", "a");
        report.add_issue("karate-club", "attachments", "c");
        assert_eq!(
            report.render(),
            "Found 3 frontmatter issue(s):\n\
             karate-club:attachments: c\n\
             karate-club:source: a\n\
             walmart-trips:title: b\n"
        );
    }

    #[test]
    fn test_lint_all_counts_documents() {
        let first = valid();
        let second = json!({"title": "x"});
        let report = DatasheetLinter::lint_all([("a", &first), ("b", &second)]);
        assert_eq!(report.documents(), 2);
        assert_eq!(report.issues().len(), 2);
        assert!(report.issues().iter().all(|issue| issue.slug == "b"));
    }

    #[test]
    fn test_non_mapping_document() {
        assert_eq!(messages(json!([1, 2])), vec!["Front-matter must be a mapping."]);
    }
}
