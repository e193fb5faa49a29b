use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::models::{Column, Dataset, DatasetView, NumericField};
use crate::routes::WidgetResult;
use crate::services::{column_values, describe, mode, percentile, preview, Summary, TablePreview};

/// Default number of table rows on the statistics page.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Statistics page request.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsParams {
    pub field: NumericField,
    /// Columns for the table preview; every column of the schema when `None`.
    pub columns: Option<Vec<Column>>,
    pub limit: usize,
}

impl Default for StatisticsParams {
    fn default() -> Self {
        Self {
            field: NumericField::PricePhp,
            columns: None,
            limit: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// The three quartile metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub percentile_25: f64,
    pub median: f64,
    pub percentile_75: f64,
}

/// Descriptive statistics page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsData {
    pub field: String,
    pub quartiles: WidgetResult<Quartiles>,
    pub summary: WidgetResult<Summary>,
    pub mode: WidgetResult<f64>,
    /// Raw values behind the box plot.
    pub box_plot: WidgetResult<Vec<f64>>,
    pub table: TablePreview,
}

pub const GET_STATISTICS_DATA: &str = "get_statistics_data";

pub fn get_statistics_data(dataset: &Dataset, params: &StatisticsParams) -> StatisticsData {
    let view = dataset.view();
    let field = params.field;

    let columns = params
        .columns
        .clone()
        .unwrap_or_else(|| dataset.schema().columns());

    StatisticsData {
        field: field.display_name().to_string(),
        quartiles: quartiles(&view, field).into(),
        summary: describe(&view, field).into(),
        mode: mode(&view, field).into(),
        box_plot: column_values(&view, field).into(),
        table: preview(&view, &columns, params.limit),
    }
}

fn quartiles(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<Quartiles> {
    Ok(Quartiles {
        percentile_25: percentile(view, field, 25.0)?,
        median: percentile(view, field, 50.0)?,
        percentile_75: percentile(view, field, 75.0)?,
    })
}
