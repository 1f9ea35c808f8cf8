//! Property-based tests for the order statistics, the dataset table and
//! temporal bucketing.

use std::collections::{BTreeMap, BTreeSet};

use ahorn_core::algorithms::{BoxPlotStats, Histogram};
use ahorn_core::core::domain::{DatasetSummary, NetworkType, NodeRange};
use ahorn_core::time::{aggregate, aggregate_with_skipped, TimeUnit};
use ahorn_core::transformations::{
    decode_query, encode_query, filter_and_sort, node_extremes, RangeSelector, SortDirection,
    SortField, ViewQuery,
};
use proptest::prelude::*;

const TAGS: [&str; 5] = ["social", "biology", "temporal", "small", "co-authorship"];

fn dataset_strategy() -> impl Strategy<Value = DatasetSummary> {
    (
        "[a-z]{1,8}",
        "[A-Za-z ]{1,12}",
        proptest::sample::subsequence(TAGS.to_vec(), 0..=3),
        proptest::sample::subsequence(NetworkType::ALL.to_vec(), 0..=2),
        0u64..10_000,
    )
        .prop_map(|(slug, title, tags, types, nodes)| {
            DatasetSummary::new(slug, title)
                .with_tags(tags)
                .with_network_types(types)
                .with_num_nodes(nodes)
        })
}

fn query_strategy(extremes: NodeRange) -> impl Strategy<Value = ViewQuery> {
    (
        "[a-z0-9 ]{0,10}",
        proptest::sample::subsequence(TAGS.to_vec(), 0..=3),
        proptest::sample::subsequence(NetworkType::ALL.to_vec(), 0..=2),
        extremes.min..=extremes.max,
        extremes.min..=extremes.max,
        prop_oneof![Just(SortField::Title), Just(SortField::NumNodes)],
        prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)],
    )
        .prop_map(move |(search, tags, types, a, b, field, direction)| {
            let mut query = ViewQuery::with_defaults(extremes);
            query.search = search;
            query.tags = tags.into_iter().map(str::to_string).collect();
            query.network_types = types.into_iter().collect();
            query.node_range = NodeRange::new(a.min(b), a.max(b));
            query.sort_field = field;
            query.sort_direction = direction;
            query
        })
}

fn date_stamp_strategy() -> impl Strategy<Value = String> {
    (2015i32..2026, 1u32..=12, 1u32..=28, 0u32..24).prop_map(|(y, m, d, h)| {
        format!("{}-{:02}-{:02} {:02}:00", y, m, d, h)
    })
}

proptest! {
    #[test]
    fn prop_quartiles_are_ordered(values in prop::collection::vec(-1e6..1e6f64, 1..200)) {
        let stats = BoxPlotStats::from_values(&values).unwrap();
        prop_assert!(stats.min <= stats.q1);
        prop_assert!(stats.q1 <= stats.median);
        prop_assert!(stats.median <= stats.q3);
        prop_assert!(stats.q3 <= stats.max);
    }

    #[test]
    fn prop_histogram_matches_expanded_sample(
        pairs in prop::collection::btree_map(0u32..500, 1u32..6, 1..40)
    ) {
        let expanded: Vec<f64> = pairs
            .iter()
            .flat_map(|(value, count)| std::iter::repeat(*value as f64).take(*count as usize))
            .collect();
        let histogram = Histogram::from_pairs(
            pairs.iter().map(|(value, count)| (*value as f64, *count as f64)),
        );

        prop_assert_eq!(
            BoxPlotStats::from_histogram(&histogram),
            BoxPlotStats::from_values(&expanded)
        );
    }

    #[test]
    fn prop_more_tags_never_add_rows(
        datasets in prop::collection::vec(dataset_strategy(), 0..30),
        extra_tag in proptest::sample::select(TAGS.to_vec()),
    ) {
        let extremes = node_extremes(&datasets);
        let query = ViewQuery::with_defaults(extremes);
        let mut narrowed = query.clone();
        narrowed.tags.insert(extra_tag.to_string());

        let wide: BTreeSet<*const DatasetSummary> =
            filter_and_sort(&datasets, &query).into_iter().map(|d| d as *const _).collect();
        let narrow: BTreeSet<*const DatasetSummary> =
            filter_and_sort(&datasets, &narrowed).into_iter().map(|d| d as *const _).collect();
        prop_assert!(narrow.is_subset(&wide));
    }

    #[test]
    fn prop_descending_reverses_distinct_counts(
        counts in prop::collection::btree_set(0u64..100_000, 0..30)
    ) {
        let datasets: Vec<DatasetSummary> = counts
            .iter()
            .map(|n| DatasetSummary::new(format!("d{}", n), "Same title").with_num_nodes(*n))
            .collect();
        let mut query = ViewQuery::with_defaults(node_extremes(&datasets));
        query.sort_field = SortField::NumNodes;

        let ascending: Vec<u64> = filter_and_sort(&datasets, &query).iter().map(|d| d.num_nodes).collect();
        query.sort_direction = SortDirection::Desc;
        let mut descending: Vec<u64> =
            filter_and_sort(&datasets, &query).iter().map(|d| d.num_nodes).collect();
        descending.reverse();

        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn prop_query_string_round_trip(
        (extremes, query) in (0u64..1_000, 0u64..100_000)
            .prop_map(|(min, span)| NodeRange::new(min, min + span))
            .prop_flat_map(|extremes| (Just(extremes), query_strategy(extremes)))
    ) {
        let encoded = encode_query(&query, extremes);
        let decoded = decode_query(&encoded, extremes);
        prop_assert_eq!(decoded.query, query);
    }

    #[test]
    fn prop_bucketing_preserves_total(
        data in prop::collection::btree_map(date_stamp_strategy(), 0u32..1_000, 0..60),
        unit in proptest::sample::select(TimeUnit::ALL.to_vec()),
    ) {
        let data: BTreeMap<String, f64> = data.into_iter().map(|(k, v)| (k, v as f64)).collect();
        let buckets = aggregate(&data, unit);

        let before: f64 = data.values().sum();
        let after: f64 = buckets.values().sum();
        prop_assert_eq!(before, after);
        prop_assert!(buckets.len() <= data.len());
    }

    #[test]
    fn prop_skipped_stamps_account_for_missing_total(
        data in prop::collection::btree_map(date_stamp_strategy(), 0u32..1_000, 0..40),
        garbage in prop::collection::btree_map("[a-z]{3,10}", 0u32..1_000, 0..10),
        unit in proptest::sample::select(TimeUnit::ALL.to_vec()),
    ) {
        let garbage_total: f64 = garbage.values().map(|v| *v as f64).sum();
        let garbage_len = garbage.len();
        let mut mixed: BTreeMap<String, f64> = data.into_iter().map(|(k, v)| (k, v as f64)).collect();
        let clean_total: f64 = mixed.values().sum();
        mixed.extend(garbage.into_iter().map(|(k, v)| (k, v as f64)));

        let result = aggregate_with_skipped(&mixed, unit);
        prop_assert_eq!(result.skipped, garbage_len);
        prop_assert_eq!(result.buckets.values().sum::<f64>(), clean_total);
        prop_assert_eq!(clean_total + garbage_total, mixed.values().sum::<f64>());
    }

    #[test]
    fn prop_range_selector_keeps_gap(
        span in 10u64..10_000,
        gap in 0u64..10,
        moves in prop::collection::vec((any::<bool>(), 0u64..20_000), 1..20),
    ) {
        let domain = NodeRange::new(0, span);
        let mut selector = RangeSelector::new(domain).with_min_gap(gap);

        for (lower, target) in moves {
            let value = if lower { selector.drag_min(target) } else { selector.drag_max(target) };
            prop_assert!(value.min >= domain.min);
            prop_assert!(value.max <= domain.max);
            prop_assert!(value.max - value.min >= gap);
        }
    }
}
