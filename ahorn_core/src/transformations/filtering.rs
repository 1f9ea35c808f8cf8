use std::cmp::Ordering;
use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::domain::{DatasetSummary, NodeRange};
use crate::transformations::query::{SortDirection, SortField, ViewQuery};

/// Returns true if `dataset` passes every clause of `query`
pub fn matches_query(dataset: &DatasetSummary, query: &ViewQuery) -> bool {
    let matches_search = query.search.is_empty()
        || dataset
            .title
            .to_lowercase()
            .contains(&query.search.to_lowercase());

    matches_search
        && dataset.has_all_tags(&query.tags)
        && dataset.has_all_network_types(&query.network_types)
        && query.node_range.contains(dataset.num_nodes)
}

/// Locale-style string ordering for display columns.
///
/// Strings compare by base letters first, ignoring accents and case, so
/// "Élan" sorts with the "e"s. Ties are broken by accents (unaccented
/// first) and then by case (lowercase before uppercase).
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Ascending comparator for `field`
pub fn compare_by(a: &DatasetSummary, b: &DatasetSummary, field: SortField) -> Ordering {
    match field {
        SortField::Title => collate(&a.title, &b.title),
        SortField::NumNodes => a.num_nodes.cmp(&b.num_nodes),
    }
}

/// Filter and order `datasets` by `query`.
///
/// The sort is stable in both directions: ties keep their input order.
pub fn filter_and_sort<'a>(
    datasets: &'a [DatasetSummary],
    query: &ViewQuery,
) -> Vec<&'a DatasetSummary> {
    let mut rows: Vec<&DatasetSummary> = datasets
        .iter()
        .filter(|d| matches_query(d, query))
        .collect();

    rows.sort_by(|a, b| {
        let ordering = compare_by(a, b, query.sort_field);
        match query.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    rows
}

/// Sorted, de-duplicated tags across all datasets
pub fn all_tags(datasets: &[DatasetSummary]) -> Vec<String> {
    datasets
        .iter()
        .flat_map(|d| d.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Smallest and largest node count in the collection; `0..=0` when empty
pub fn node_extremes(datasets: &[DatasetSummary]) -> NodeRange {
    let min = datasets.iter().map(|d| d.num_nodes).min();
    let max = datasets.iter().map(|d| d.num_nodes).max();
    match (min, max) {
        (Some(min), Some(max)) => NodeRange::new(min, max),
        _ => NodeRange::new(0, 0),
    }
}
