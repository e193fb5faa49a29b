//! Grouped statistics over a filtered view.
//!
//! Every function works on one numeric column of a [`DatasetView`]. Blank
//! cells are skipped. When nothing is left to compute over the result is
//! [`PipelineError::EmptySelection`], never a NaN.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{CategoryField, DatasetView, NumericField};

/// How the values of one group or time bucket are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    #[default]
    Sum,
    Mean,
}

impl Reducer {
    pub fn apply(self, sum: f64, count: usize) -> f64 {
        match self {
            Reducer::Sum => sum,
            Reducer::Mean => sum / count as f64,
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reducer::Sum => f.write_str("sum"),
            Reducer::Mean => f.write_str("mean"),
        }
    }
}

impl FromStr for Reducer {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" | "total" => Ok(Reducer::Sum),
            "mean" | "average" | "avg" => Ok(Reducer::Mean),
            other => Err(PipelineError::invalid_parameter(
                "reducer",
                format!("'{}' is not one of sum, mean", other),
            )),
        }
    }
}

/// Which end of a ranking to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Top,
    Bottom,
}

impl FromStr for Direction {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" | "largest" => Ok(Direction::Top),
            "bottom" | "smallest" => Ok(Direction::Bottom),
            other => Err(PipelineError::invalid_parameter(
                "view",
                format!("'{}' is not one of top, bottom", other),
            )),
        }
    }
}

/// One group of an aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupValue {
    /// Values of the key columns, in the order the keys were requested.
    pub key: Vec<String>,
    pub value: f64,
    /// Non-blank observations that went into `value`.
    pub count: usize,
}

/// Grouped statistic, one entry per populated group.
pub type AggregationResult = Vec<GroupValue>;

/// Occurrences of one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Non-blank values of a numeric column.
pub(crate) fn values(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<Vec<f64>> {
    view.schema().require_numeric(field)?;
    Ok(view.iter().filter_map(|r| r.numeric(field)).collect())
}

fn non_empty_values(
    view: &DatasetView<'_>,
    field: NumericField,
    operation: &str,
) -> PipelineResult<Vec<f64>> {
    let values = values(view, field)?;
    if values.is_empty() {
        return Err(PipelineError::empty(operation));
    }
    Ok(values)
}

pub(crate) fn sorted_values(
    view: &DatasetView<'_>,
    field: NumericField,
    operation: &str,
) -> PipelineResult<Vec<f64>> {
    let mut values = non_empty_values(view, field, operation)?;
    values.sort_by(f64::total_cmp);
    Ok(values)
}

/// Linear interpolation between closest ranks on sorted, non-empty input.
pub(crate) fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Arithmetic sum.
pub fn total(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<f64> {
    Ok(non_empty_values(view, field, "total")?.iter().sum())
}

/// Arithmetic mean.
pub fn mean(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<f64> {
    let values = non_empty_values(view, field, "mean")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<f64> {
    let sorted = sorted_values(view, field, "median")?;
    Ok(percentile_of_sorted(&sorted, 50.0))
}

/// Percentile `p` in [0, 100].
pub fn percentile(view: &DatasetView<'_>, field: NumericField, p: f64) -> PipelineResult<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(PipelineError::InvalidPercentile { value: p });
    }
    let sorted = sorted_values(view, field, "percentile")?;
    Ok(percentile_of_sorted(&sorted, p))
}

/// Group by one or more category columns and reduce each group.
///
/// Entries come back ordered by key; callers that need another order sort
/// the result themselves.
pub fn group_aggregate(
    view: &DatasetView<'_>,
    keys: &[CategoryField],
    field: NumericField,
    reducer: Reducer,
) -> PipelineResult<AggregationResult> {
    if keys.is_empty() {
        return Err(PipelineError::invalid_parameter(
            "keys",
            "at least one grouping column is required",
        ));
    }
    for key in keys {
        view.schema().require_category(*key)?;
    }
    view.schema().require_numeric(field)?;

    let mut groups: BTreeMap<Vec<&str>, (f64, usize)> = BTreeMap::new();
    for record in view.iter() {
        let Some(value) = record.numeric(field) else {
            continue;
        };
        let key = keys.iter().map(|k| record.category(*k)).collect();
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    if groups.is_empty() {
        return Err(PipelineError::empty("group_aggregate"));
    }

    Ok(groups
        .into_iter()
        .map(|(key, (sum, count))| GroupValue {
            key: key.into_iter().map(str::to_string).collect(),
            value: reducer.apply(sum, count),
            count,
        })
        .collect())
}

/// Mean per group.
pub fn group_mean(
    view: &DatasetView<'_>,
    keys: &[CategoryField],
    field: NumericField,
) -> PipelineResult<AggregationResult> {
    group_aggregate(view, keys, field, Reducer::Mean)
}

/// Sum per group.
pub fn group_total(
    view: &DatasetView<'_>,
    keys: &[CategoryField],
    field: NumericField,
) -> PipelineResult<AggregationResult> {
    group_aggregate(view, keys, field, Reducer::Sum)
}

/// The `k` groups with the highest or lowest mean.
///
/// Ties on the mean go to the smaller key for `Top` and to the larger key
/// for `Bottom`, so the two rankings are mirror images of one total order
/// and never share a group while `2k` does not exceed the group count.
pub fn ranked(
    view: &DatasetView<'_>,
    key: CategoryField,
    field: NumericField,
    k: usize,
    direction: Direction,
) -> PipelineResult<AggregationResult> {
    if k == 0 {
        return Err(PipelineError::invalid_parameter("k", "must be at least 1"));
    }
    let mut groups = group_mean(view, &[key], field)?;

    // Ascending value, descending key.
    let ascending = |a: &GroupValue, b: &GroupValue| -> Ordering {
        a.value.total_cmp(&b.value).then_with(|| b.key.cmp(&a.key))
    };
    match direction {
        Direction::Top => groups.sort_by(|a, b| ascending(b, a)),
        Direction::Bottom => groups.sort_by(ascending),
    }
    groups.truncate(k);
    Ok(groups)
}

pub fn top_k(
    view: &DatasetView<'_>,
    key: CategoryField,
    field: NumericField,
    k: usize,
) -> PipelineResult<AggregationResult> {
    ranked(view, key, field, k, Direction::Top)
}

pub fn bottom_k(
    view: &DatasetView<'_>,
    key: CategoryField,
    field: NumericField,
    k: usize,
) -> PipelineResult<AggregationResult> {
    ranked(view, key, field, k, Direction::Bottom)
}

/// Record count per distinct value, most frequent first, ties by value.
pub fn frequency(
    view: &DatasetView<'_>,
    key: CategoryField,
) -> PipelineResult<Vec<CategoryCount>> {
    view.schema().require_category(key)?;
    if view.is_empty() {
        return Err(PipelineError::empty("frequency"));
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in view.iter() {
        *counts.entry(record.category(key)).or_default() += 1;
    }

    let mut result: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    Ok(result)
}
