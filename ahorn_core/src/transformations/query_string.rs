//! Projection of [`ViewQuery`] onto a URL query string.
//!
//! Recognised parameters are `search`, `tags` and `types` (comma-separated),
//! `sort`, `dir`, `minNodes` and `maxNodes`. Fields equal to their default are
//! left out when encoding; absent or unparseable parameters fall back to the
//! default of that field alone when decoding. Unknown parameters are ignored.
//!
//! Tags are joined with commas, so a tag containing a comma does not survive
//! a round trip. Empty tags are never written; empty list items are skipped
//! when reading.

use url::form_urlencoded;

use crate::core::domain::{NetworkType, NodeRange};
use crate::transformations::query::{SortDirection, SortField, ViewQuery};

pub const SEARCH_PARAM: &str = "search";
pub const TAGS_PARAM: &str = "tags";
pub const TYPES_PARAM: &str = "types";
pub const SORT_PARAM: &str = "sort";
pub const DIR_PARAM: &str = "dir";
pub const MIN_NODES_PARAM: &str = "minNodes";
pub const MAX_NODES_PARAM: &str = "maxNodes";

/// Path of the dataset list page.
pub const DATASET_LIST_PATH: &str = "/dataset";

/// Result of seeding a query from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedQuery {
    pub query: ViewQuery,
    /// True when `minNodes` or `maxNodes` was present and parsed.
    pub range_from_url: bool,
}

/// Serialises `query` into its canonical query string (without `?`).
///
/// # Examples
///
/// ```
/// use ahorn_core::core::domain::NodeRange;
/// use ahorn_core::transformations::query::ViewQuery;
/// use ahorn_core::transformations::query_string::encode_query;
///
/// let extremes = NodeRange::new(0, 100);
/// let mut query = ViewQuery::with_defaults(extremes);
/// assert_eq!(encode_query(&query, extremes), "");
///
/// query.search = "high school".into();
/// query.node_range = NodeRange::new(20, 100);
/// assert_eq!(encode_query(&query, extremes), "search=high+school&minNodes=20");
/// ```
pub fn encode_query(query: &ViewQuery, extremes: NodeRange) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !query.search.is_empty() {
        serializer.append_pair(SEARCH_PARAM, &query.search);
    }
    let tags: Vec<&str> = query
        .tags
        .iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect();
    if !tags.is_empty() {
        serializer.append_pair(TAGS_PARAM, &tags.join(","));
    }
    if !query.network_types.is_empty() {
        let types: Vec<&str> = query.network_types.iter().map(NetworkType::as_str).collect();
        serializer.append_pair(TYPES_PARAM, &types.join(","));
    }
    if query.sort_field != SortField::default() {
        serializer.append_pair(SORT_PARAM, query.sort_field.as_str());
    }
    if query.sort_direction != SortDirection::default() {
        serializer.append_pair(DIR_PARAM, query.sort_direction.as_str());
    }
    if query.node_range.min != extremes.min {
        serializer.append_pair(MIN_NODES_PARAM, &query.node_range.min.to_string());
    }
    if query.node_range.max != extremes.max {
        serializer.append_pair(MAX_NODES_PARAM, &query.node_range.max.to_string());
    }

    serializer.finish()
}

/// Parses a query string (with or without the leading `?`).
pub fn decode_query(query_string: &str, extremes: NodeRange) -> DecodedQuery {
    let mut query = ViewQuery::with_defaults(extremes);
    let mut min_nodes: Option<u64> = None;
    let mut max_nodes: Option<u64> = None;

    let input = query_string.strip_prefix('?').unwrap_or(query_string);
    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        match &*key {
            SEARCH_PARAM => query.search = value.into_owned(),
            TAGS_PARAM => {
                query.tags = split_list(&value).map(str::to_string).collect();
            }
            TYPES_PARAM => {
                query.network_types = split_list(&value)
                    .filter_map(|raw| match raw.parse::<NetworkType>() {
                        Ok(network_type) => Some(network_type),
                        Err(e) => {
                            log::debug!("Ignoring URL network type: {}", e);
                            None
                        }
                    })
                    .collect();
            }
            SORT_PARAM => match value.parse::<SortField>() {
                Ok(field) => query.sort_field = field,
                Err(e) => log::debug!("Falling back to default sort: {}", e),
            },
            DIR_PARAM => match value.parse::<SortDirection>() {
                Ok(direction) => query.sort_direction = direction,
                Err(e) => log::debug!("Falling back to default direction: {}", e),
            },
            MIN_NODES_PARAM => min_nodes = parse_count(&value),
            MAX_NODES_PARAM => max_nodes = parse_count(&value),
            _ => {}
        }
    }

    let range_from_url = min_nodes.is_some() || max_nodes.is_some();
    query.node_range = NodeRange::new(
        min_nodes.unwrap_or(extremes.min),
        max_nodes.unwrap_or(extremes.max),
    )
    .clamped_to(extremes);

    DecodedQuery {
        query,
        range_from_url,
    }
}

/// Link to the dataset list pre-filtered to one network type.
pub fn network_type_href(network_type: NetworkType) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(TYPES_PARAM, network_type.as_str())
        .finish();
    format!("{}?{}", DATASET_LIST_PATH, query)
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|item| !item.is_empty())
}

fn parse_count(value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(count) => Some(count),
        Err(_) => {
            log::debug!("Ignoring non-numeric node bound {:?}", value);
            None
        }
    }
}
