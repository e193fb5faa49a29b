//! Descriptive summaries for the statistics page.

use serde::{Deserialize, Serialize};

use super::aggregation::{percentile_of_sorted, sorted_values, total};
use crate::error::{PipelineError, PipelineResult};
use crate::models::{Column, DatasetView, NumericField};

/// `describe()`-style summary of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent for a single observation.
    pub std: Option<f64>,
    pub min: f64,
    pub percentile_25: f64,
    pub median: f64,
    pub percentile_75: f64,
    pub max: f64,
}

/// Progress of the filtered total towards a target amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub current: f64,
    pub target: f64,
    /// Rounded percentage of the target reached.
    pub percent: i64,
    pub reached: bool,
}

/// First rows of a view projected onto display columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows in the view before `limit` was applied.
    pub total_rows: usize,
}

pub fn describe(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<Summary> {
    let sorted = sorted_values(view, field, "describe")?;
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    });

    Ok(Summary {
        count,
        mean,
        std,
        min: sorted[0],
        percentile_25: percentile_of_sorted(&sorted, 25.0),
        median: percentile_of_sorted(&sorted, 50.0),
        percentile_75: percentile_of_sorted(&sorted, 75.0),
        max: sorted[count - 1],
    })
}

/// Most common value; the smallest one wins a tie.
pub fn mode(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<f64> {
    let sorted = sorted_values(view, field, "mode")?;

    let mut best = (sorted[0], 0usize);
    let mut run = (sorted[0], 0usize);
    for value in sorted {
        if value == run.0 {
            run.1 += 1;
        } else {
            run = (value, 1);
        }
        if run.1 > best.1 {
            best = run;
        }
    }
    Ok(best.0)
}

/// Raw values for a box plot, in view order.
pub fn column_values(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<Vec<f64>> {
    let values = super::aggregation::values(view, field)?;
    if values.is_empty() {
        return Err(PipelineError::empty("column_values"));
    }
    Ok(values)
}

pub fn target_progress(
    view: &DatasetView<'_>,
    field: NumericField,
    target: f64,
) -> PipelineResult<TargetProgress> {
    if !target.is_finite() || target <= 0.0 {
        return Err(PipelineError::invalid_parameter(
            "target",
            "must be a positive number",
        ));
    }
    let current = total(view, field)?;
    Ok(TargetProgress {
        current,
        target,
        percent: (current / target * 100.0).round() as i64,
        reached: current >= target,
    })
}

/// Project the first `limit` rows onto `columns`.
///
/// Columns the dataset does not have are dropped, mirroring how the column
/// picker only offers what exists.
pub fn preview(view: &DatasetView<'_>, columns: &[Column], limit: usize) -> TablePreview {
    let present: Vec<Column> = columns
        .iter()
        .copied()
        .filter(|c| view.schema().has_column(*c))
        .collect();

    TablePreview {
        columns: present.iter().map(|c| c.display_name().to_string()).collect(),
        rows: view
            .iter()
            .take(limit)
            .map(|r| present.iter().map(|c| r.cell(*c)).collect())
            .collect(),
        total_rows: view.len(),
    }
}
