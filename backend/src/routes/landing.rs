use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CategoryField, Dataset, Selection};
use crate::services::{distinct_values, preview, TablePreview};

/// Rows shown in the introduction page sample table.
pub const SAMPLE_ROWS: usize = 5;

/// One column present in the loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub tag: String,
    pub name: String,
}

/// Introduction page: what was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub source: String,
    pub row_count: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub checksum: Option<String>,
    pub columns: Vec<ColumnInfo>,
    pub sample: TablePreview,
}

/// Sidebar multiselect options, `ALL` first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub commodities: Vec<String>,
}

pub const GET_DATASET_INFO: &str = "get_dataset_info";
pub const GET_FILTER_OPTIONS: &str = "get_filter_options";

pub fn get_dataset_info(dataset: &Dataset, source: &str) -> DatasetInfo {
    let columns = dataset.schema().columns();
    let (start_date, end_date) = match dataset.date_range() {
        Some((start, end)) => (Some(start), Some(end)),
        None => (None, None),
    };

    DatasetInfo {
        source: source.to_string(),
        row_count: dataset.len(),
        start_date,
        end_date,
        checksum: dataset.checksum().map(str::to_string),
        columns: columns
            .iter()
            .map(|c| ColumnInfo {
                tag: c.tag().to_string(),
                name: c.display_name().to_string(),
            })
            .collect(),
        sample: preview(&dataset.view(), &columns, SAMPLE_ROWS),
    }
}

pub fn get_filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        regions: option_list(dataset, CategoryField::Region),
        commodities: option_list(dataset, CategoryField::Commodity),
    }
}

/// `ALL` followed by the sorted distinct values. A missing column still
/// offers `ALL`, which never needs the column.
fn option_list(dataset: &Dataset, field: CategoryField) -> Vec<String> {
    let values = distinct_values(dataset, field).unwrap_or_else(|e| {
        log::warn!("No {} options: {}", field.display_name(), e);
        Vec::new()
    });

    let mut options = Vec::with_capacity(values.len() + 1);
    options.push(Selection::ALL_TOKEN.to_string());
    options.extend(values);
    options
}
