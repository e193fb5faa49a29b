use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::models::{CategoryField, Dataset, DatasetView, NumericField};
use crate::routes::WidgetResult;
use crate::services::{describe, frequency, mean, total, CategoryCount, Summary};

/// Categorical columns offered for frequency analysis.
pub const ANALYSIS_COLUMNS: [CategoryField; 6] = [
    CategoryField::Region,
    CategoryField::Subregion,
    CategoryField::Market,
    CategoryField::Commodity,
    CategoryField::CommodityType,
    CategoryField::PriceType,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionParams {
    pub column: CategoryField,
    pub field: NumericField,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            column: CategoryField::Region,
            field: NumericField::PricePhp,
        }
    }
}

/// Numerical analysis panel: summary plus total and average cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub summary: Summary,
    pub total: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionData {
    pub column: String,
    pub field: String,
    /// Analysis columns present in the dataset.
    pub available_columns: Vec<String>,
    pub frequency: WidgetResult<Vec<CategoryCount>>,
    pub numeric: WidgetResult<NumericSummary>,
}

pub const GET_DISTRIBUTION_DATA: &str = "get_distribution_data";

pub fn get_distribution_data(dataset: &Dataset, params: &DistributionParams) -> DistributionData {
    let view = dataset.view();

    DistributionData {
        column: params.column.display_name().to_string(),
        field: params.field.display_name().to_string(),
        available_columns: ANALYSIS_COLUMNS
            .iter()
            .filter(|c| dataset.schema().has_category(**c))
            .map(|c| c.display_name().to_string())
            .collect(),
        frequency: frequency(&view, params.column).into(),
        numeric: numeric_summary(&view, params.field).into(),
    }
}

fn numeric_summary(view: &DatasetView<'_>, field: NumericField) -> PipelineResult<NumericSummary> {
    Ok(NumericSummary {
        summary: describe(view, field)?,
        total: total(view, field)?,
        average: mean(view, field)?,
    })
}
