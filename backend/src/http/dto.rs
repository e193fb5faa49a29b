//! Data Transfer Objects for the HTTP API.
//!
//! Page responses are re-exported from the api module since they already
//! derive Serialize/Deserialize. The query structs here keep every parameter
//! as raw text and convert into the typed page parameters, so a bad value is
//! reported as a pipeline error instead of an extractor rejection.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Landing
    ColumnInfo, DatasetInfo, FilterOptions,
    // Statistics
    Quartiles, StatisticsData,
    // Distribution
    DistributionData, NumericSummary,
    // Visualization
    KeyMetrics, Ranking, VisualizationData,
};

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Column, FilterSelection, Selection};
use crate::routes::distribution::DistributionParams;
use crate::routes::statistics::StatisticsParams;
use crate::routes::visualization::VisualizationParams;

/// Query parameters for the statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatisticsQuery {
    /// Numeric column to summarise (default: price in PHP)
    #[serde(default)]
    pub field: Option<String>,
    /// Comma-separated columns for the table preview (default: all)
    #[serde(default)]
    pub columns: Option<String>,
    /// Table preview rows
    #[serde(default)]
    pub limit: Option<String>,
}

impl StatisticsQuery {
    pub fn into_params(self) -> PipelineResult<StatisticsParams> {
        let mut params = StatisticsParams::default();
        if let Some(field) = self.field {
            params.field = field.parse()?;
        }
        if let Some(columns) = self.columns {
            params.columns = Some(parse_columns(&columns)?);
        }
        if let Some(limit) = self.limit {
            params.limit = parse_number("limit", &limit)?;
        }
        Ok(params)
    }
}

/// Query parameters for the distribution endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DistributionQuery {
    /// Categorical column for the frequency chart
    #[serde(default)]
    pub column: Option<String>,
    /// Numeric column for the summary panel
    #[serde(default)]
    pub field: Option<String>,
}

impl DistributionQuery {
    pub fn into_params(self) -> PipelineResult<DistributionParams> {
        let mut params = DistributionParams::default();
        if let Some(column) = self.column {
            params.column = column.parse()?;
        }
        if let Some(field) = self.field {
            params.field = field.parse()?;
        }
        Ok(params)
    }
}

/// Query parameters for the visualization endpoint.
///
/// Built from the raw query pairs rather than a derived extractor, because
/// `regions` and `commodities` repeat once per selected value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualizationQuery {
    /// Selected regions; absent means ALL
    pub regions: Option<Vec<String>>,
    /// Selected commodities; absent means ALL
    pub commodities: Option<Vec<String>>,
    pub field: Option<String>,
    /// daily, monthly, quarterly or yearly
    pub granularity: Option<String>,
    /// sum or mean
    pub reducer: Option<String>,
    /// top or bottom
    pub view: Option<String>,
    /// Ranking size
    pub k: Option<String>,
    /// Progress bar target
    pub target: Option<String>,
}

impl VisualizationQuery {
    /// Collect `?regions=A&regions=B&k=3` style pairs. Single-valued
    /// parameters keep their last occurrence; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "regions" => query.regions.get_or_insert_with(Vec::new).push(value),
                "commodities" => query.commodities.get_or_insert_with(Vec::new).push(value),
                "field" => query.field = Some(value),
                "granularity" => query.granularity = Some(value),
                "reducer" => query.reducer = Some(value),
                "view" => query.view = Some(value),
                "k" => query.k = Some(value),
                "target" => query.target = Some(value),
                _ => {}
            }
        }
        query
    }

    pub fn into_params(self) -> PipelineResult<VisualizationParams> {
        let mut params = VisualizationParams {
            filter: FilterSelection::new(
                Selection::from_query(self.regions.as_deref()),
                Selection::from_query(self.commodities.as_deref()),
            ),
            ..Default::default()
        };
        if let Some(field) = self.field {
            params.field = field.parse()?;
        }
        if let Some(granularity) = self.granularity {
            params.granularity = granularity.parse()?;
        }
        if let Some(reducer) = self.reducer {
            params.reducer = reducer.parse()?;
        }
        if let Some(view) = self.view {
            params.direction = view.parse()?;
        }
        if let Some(k) = self.k {
            params.k = parse_number("k", &k)?;
        }
        if let Some(target) = self.target {
            params.target = parse_number("target", &target)?;
        }
        Ok(params)
    }
}

fn parse_columns(raw: &str) -> PipelineResult<Vec<Column>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Column::from_name(name).ok_or_else(|| {
                PipelineError::invalid_parameter("columns", format!("unknown column '{}'", name))
            })
        })
        .collect()
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> PipelineResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| PipelineError::invalid_parameter(name, format!("'{}' is not a valid number", raw)))
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether the dataset has been loaded yet
    pub dataset: String,
    /// Where the dataset comes from
    pub source: String,
}
