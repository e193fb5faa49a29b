//! Public API surface for the backend.
//!
//! This file consolidates the DTO types served over HTTP. All of them derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::routes::distribution::DistributionData;
pub use crate::routes::distribution::DistributionParams;
pub use crate::routes::distribution::NumericSummary;
pub use crate::routes::landing::ColumnInfo;
pub use crate::routes::landing::DatasetInfo;
pub use crate::routes::landing::FilterOptions;
pub use crate::routes::statistics::Quartiles;
pub use crate::routes::statistics::StatisticsData;
pub use crate::routes::statistics::StatisticsParams;
pub use crate::routes::visualization::KeyMetrics;
pub use crate::routes::visualization::Ranking;
pub use crate::routes::visualization::VisualizationData;
pub use crate::routes::visualization::VisualizationParams;
pub use crate::routes::WidgetResult;

pub use crate::services::AggregationResult;
pub use crate::services::CategoryCount;
pub use crate::services::GroupValue;
pub use crate::services::Summary;
pub use crate::services::TablePreview;
pub use crate::services::TargetProgress;
pub use crate::services::TimePoint;
pub use crate::services::TimeSeries;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_value_serialization() {
        let group = GroupValue {
            key: vec!["Retail".to_string(), "Rice".to_string()],
            value: 39.0,
            count: 2,
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["key"][1], "Rice");
        assert_eq!(json["value"], 39.0);
    }

    #[test]
    fn test_time_point_date_format() {
        let point = TimePoint {
            date: chrono::NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            value: 12.0,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"2020-04-01\""));
    }

    #[test]
    fn test_widget_result_deserialize() {
        let widget: WidgetResult<Summary> =
            serde_json::from_str(r#"{"status":"empty"}"#).unwrap();
        assert_eq!(widget, WidgetResult::Empty);
    }
}
