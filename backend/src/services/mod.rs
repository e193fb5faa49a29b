//! The filter → aggregate → resample pipeline.
//!
//! Every dashboard page goes through these functions instead of carrying its
//! own copy of the grouping logic. All of them are pure: they borrow a
//! [`Dataset`](crate::models::Dataset) or a view of it and return new values.

pub mod aggregation;
pub mod filter;
pub mod resample;
pub mod statistics;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregation::{
    bottom_k, frequency, group_aggregate, group_mean, group_total, mean, median, percentile,
    ranked, top_k, total, AggregationResult, CategoryCount, Direction, GroupValue, Reducer,
};
pub use filter::{distinct_values, filter, filter_by};
pub use resample::{price_trend, resample, Granularity, TimePoint, TimeSeries};
pub use statistics::{
    column_values, describe, mode, preview, target_progress, Summary, TablePreview,
    TargetProgress,
};
