pub mod buckets;

pub use buckets::{
    aggregate, aggregate_with_skipped, bucket_key, bucket_start, parse_date_stamp, Aggregation,
    BucketValue, TimeUnit, UnitRange,
};
