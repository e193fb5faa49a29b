use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::models::{CategoryField, Dataset, DatasetView, FilterSelection, NumericField};
use crate::routes::WidgetResult;
use crate::services::{
    filter, frequency, group_mean, group_total, mean, median, mode, price_trend, ranked,
    target_progress, total, AggregationResult, CategoryCount, Direction, Granularity, Reducer,
    TargetProgress, TimeSeries,
};

/// Size of the top/bottom commodity ranking.
pub const DEFAULT_RANK_SIZE: usize = 5;

/// Sales target for the progress bar, in the selected price unit.
pub const DEFAULT_TARGET: f64 = 1_000_000.0;

/// Visualization page request: sidebar filters plus widget controls.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationParams {
    pub filter: FilterSelection,
    pub field: NumericField,
    pub granularity: Granularity,
    pub reducer: Reducer,
    pub direction: Direction,
    pub k: usize,
    pub target: f64,
}

impl Default for VisualizationParams {
    fn default() -> Self {
        Self {
            filter: FilterSelection::all(),
            field: NumericField::PricePhp,
            granularity: Granularity::default(),
            reducer: Reducer::default(),
            direction: Direction::default(),
            k: DEFAULT_RANK_SIZE,
            target: DEFAULT_TARGET,
        }
    }
}

impl VisualizationParams {
    /// Reject controls no widget could honour.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.k == 0 {
            return Err(PipelineError::invalid_parameter("k", "must be at least 1"));
        }
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(PipelineError::invalid_parameter(
                "target",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Headline metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub direction: Direction,
    pub groups: AggregationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    pub field: String,
    /// Records left after the sidebar filter; zero when the filter failed.
    pub matched_records: usize,
    pub key_metrics: WidgetResult<KeyMetrics>,
    /// Commodity type shares for the pie chart.
    pub category_distribution: WidgetResult<Vec<CategoryCount>>,
    /// Mean price per (price type, commodity).
    pub retail_vs_wholesale: WidgetResult<AggregationResult>,
    pub ranking: WidgetResult<Ranking>,
    /// Total per commodity, smallest first for the horizontal bar chart.
    pub price_by_commodity: WidgetResult<AggregationResult>,
    pub price_trend: WidgetResult<TimeSeries>,
    pub progress: WidgetResult<TargetProgress>,
}

pub const GET_VISUALIZATION_DATA: &str = "get_visualization_data";

/// Run the filter once and build every widget from the same view.
///
/// Only invalid request parameters fail the whole page; everything else is
/// reported per widget.
pub fn get_visualization_data(
    dataset: &Dataset,
    params: &VisualizationParams,
) -> PipelineResult<VisualizationData> {
    params.validate()?;

    let view = filter(dataset, &params.filter);
    let field = params.field;

    Ok(VisualizationData {
        field: field.display_name().to_string(),
        matched_records: view.as_ref().map(DatasetView::len).unwrap_or(0),
        key_metrics: widget(&view, |v| {
            Ok(KeyMetrics {
                total: total(v, field)?,
                mean: mean(v, field)?,
                median: median(v, field)?,
                mode: mode(v, field)?,
            })
        }),
        category_distribution: widget(&view, |v| frequency(v, CategoryField::CommodityType)),
        retail_vs_wholesale: widget(&view, |v| {
            group_mean(v, &[CategoryField::PriceType, CategoryField::Commodity], field)
        }),
        ranking: widget(&view, |v| {
            Ok(Ranking {
                direction: params.direction,
                groups: ranked(v, CategoryField::Commodity, field, params.k, params.direction)?,
            })
        }),
        price_by_commodity: widget(&view, |v| {
            let mut groups = group_total(v, &[CategoryField::Commodity], field)?;
            groups.sort_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.key.cmp(&b.key)));
            Ok(groups)
        }),
        price_trend: widget(&view, |v| {
            price_trend(v, field, params.granularity, params.reducer)
        }),
        progress: widget(&view, |v| target_progress(v, field, params.target)),
    })
}

fn widget<'a, T>(
    view: &PipelineResult<DatasetView<'a>>,
    build: impl FnOnce(&DatasetView<'a>) -> PipelineResult<T>,
) -> WidgetResult<T> {
    match view {
        Ok(view) => build(view).into(),
        Err(e) => WidgetResult::Unavailable {
            message: e.to_string(),
        },
    }
}
