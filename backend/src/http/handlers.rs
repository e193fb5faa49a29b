//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the page
//! builders in [`crate::routes`]. The pipeline is synchronous and CPU bound,
//! so it runs on the blocking pool.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::dto::{
    DatasetInfo, DistributionData, DistributionQuery, FilterOptions, HealthResponse,
    StatisticsData, StatisticsQuery, VisualizationData, VisualizationQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::error::PipelineResult;
use crate::models::Dataset;
use crate::routes::{distribution, landing, statistics, visualization};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Load (or reuse) the dataset and run `build` on the blocking pool.
async fn with_dataset<T, F>(state: &AppState, build: F) -> HandlerResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Dataset) -> PipelineResult<T> + Send + 'static,
{
    let cache = Arc::clone(&state.cache);
    let data = tokio::task::spawn_blocking(move || {
        let dataset = cache.get()?;
        build(&dataset)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(data))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports whether the dataset is loaded without triggering a load.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let dataset = if state.cache.is_loaded() {
        "loaded"
    } else {
        "not loaded"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        dataset: dataset.to_string(),
        source: state.cache.source_description(),
    }))
}

// =============================================================================
// Introduction
// =============================================================================

/// GET /v1/dataset
///
/// Size, date range, columns and a sample of the loaded file.
pub async fn get_dataset_info(State(state): State<AppState>) -> HandlerResult<DatasetInfo> {
    let source = state.cache.source_description();
    with_dataset(&state, move |dataset| {
        Ok(landing::get_dataset_info(dataset, &source))
    })
    .await
}

/// GET /v1/options
///
/// Region and commodity choices for the sidebar.
pub async fn get_filter_options(State(state): State<AppState>) -> HandlerResult<FilterOptions> {
    with_dataset(&state, |dataset| Ok(landing::get_filter_options(dataset))).await
}

// =============================================================================
// Descriptive Statistics
// =============================================================================

/// GET /v1/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> HandlerResult<StatisticsData> {
    let params = query.into_params()?;
    with_dataset(&state, move |dataset| {
        Ok(statistics::get_statistics_data(dataset, &params))
    })
    .await
}

/// GET /v1/distribution
pub async fn get_distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> HandlerResult<DistributionData> {
    let params = query.into_params()?;
    with_dataset(&state, move |dataset| {
        Ok(distribution::get_distribution_data(dataset, &params))
    })
    .await
}

// =============================================================================
// Visualization
// =============================================================================

/// GET /v1/visualization
///
/// Every chart of the visualization page for one sidebar selection.
pub async fn get_visualization(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HandlerResult<VisualizationData> {
    let params = VisualizationQuery::from_pairs(pairs).into_params()?;
    with_dataset(&state, move |dataset| {
        visualization::get_visualization_data(dataset, &params)
    })
    .await
}
