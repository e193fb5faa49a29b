use std::collections::BTreeSet;

use crate::error::PipelineResult;
use crate::models::{CategoryField, Dataset, DatasetView, FilterSelection, Selection};

/// Keep the records whose region AND commodity are selected.
///
/// `Selection::All` places no restriction on its dimension and does not need
/// the column to exist. An explicit empty selection matches nothing.
pub fn filter<'a>(
    dataset: &'a Dataset,
    selection: &FilterSelection,
) -> PipelineResult<DatasetView<'a>> {
    let view = filter_by(&dataset.view(), CategoryField::Region, &selection.regions)?;
    let view = filter_by(&view, CategoryField::Commodity, &selection.commodities)?;

    log::debug!(
        "Filter kept {} of {} records (regions={:?}, commodities={:?})",
        view.len(),
        dataset.len(),
        selection.regions,
        selection.commodities
    );
    Ok(view)
}

/// Restrict a view on any categorical column.
pub fn filter_by<'a>(
    view: &DatasetView<'a>,
    field: CategoryField,
    selection: &Selection,
) -> PipelineResult<DatasetView<'a>> {
    if selection.is_all() {
        return Ok(view.clone());
    }
    view.schema().require_category(field)?;

    let records = view
        .iter()
        .filter(|r| selection.matches(r.category(field)))
        .collect();
    Ok(DatasetView::new(view.schema(), records))
}

/// Sorted distinct non-blank values of a categorical column.
pub fn distinct_values(dataset: &Dataset, field: CategoryField) -> PipelineResult<Vec<String>> {
    dataset.schema().require_category(field)?;

    let values: BTreeSet<&str> = dataset
        .records()
        .iter()
        .map(|r| r.category(field))
        .filter(|v| !v.is_empty())
        .collect();
    Ok(values.into_iter().map(str::to_string).collect())
}
