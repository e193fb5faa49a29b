//! Calendar resampling of price series.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::aggregation::Reducer;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{DatasetView, NumericField};

/// Width of one time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    /// First day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        let (year, month, day) = match self {
            Granularity::Daily => return date,
            Granularity::Monthly => (date.year(), date.month(), 1),
            Granularity::Quarterly => (date.year(), (date.month0() / 3) * 3 + 1, 1),
            Granularity::Yearly => (date.year(), 1, 1),
        };
        // Day 1 of an existing month in the same year is always valid.
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Daily => "Daily",
            Granularity::Monthly => "Monthly",
            Granularity::Quarterly => "Quarterly",
            Granularity::Yearly => "Yearly",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Granularity::Daily),
            "monthly" | "m" => Ok(Granularity::Monthly),
            "quarterly" | "q" => Ok(Granularity::Quarterly),
            "yearly" | "y" => Ok(Granularity::Yearly),
            _ => Err(PipelineError::InvalidGranularity {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Start of the bucket.
    pub date: NaiveDate,
    pub value: f64,
}

/// Resampled series, ascending by bucket start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    pub reducer: Reducer,
    pub points: Vec<TimePoint>,
}

/// Bucket `(date, value)` observations on calendar boundaries.
///
/// Only populated buckets are emitted; there is no zero filling.
pub fn resample(
    observations: &[(NaiveDate, f64)],
    granularity: Granularity,
    reducer: Reducer,
) -> PipelineResult<TimeSeries> {
    if observations.is_empty() {
        return Err(PipelineError::empty("resample"));
    }

    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for (date, value) in observations {
        let bucket = buckets
            .entry(granularity.bucket_start(*date))
            .or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }

    Ok(TimeSeries {
        granularity,
        reducer,
        points: buckets
            .into_iter()
            .map(|(date, (sum, count))| TimePoint {
                date,
                value: reducer.apply(sum, count),
            })
            .collect(),
    })
}

/// Resample one numeric column of a view.
pub fn price_trend(
    view: &DatasetView<'_>,
    field: NumericField,
    granularity: Granularity,
    reducer: Reducer,
) -> PipelineResult<TimeSeries> {
    resample(&view.series(field)?, granularity, reducer)
}
