use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::fields::{CategoryField, Column, NumericField};
use super::record::PriceRecord;
use crate::error::{PipelineError, PipelineResult};

/// Columns present in the loaded table.
///
/// `#date` is always present; a file without it never becomes a `Dataset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    categories: BTreeSet<CategoryField>,
    numerics: BTreeSet<NumericField>,
}

impl Schema {
    pub fn new(
        categories: impl IntoIterator<Item = CategoryField>,
        numerics: impl IntoIterator<Item = NumericField>,
    ) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            numerics: numerics.into_iter().collect(),
        }
    }

    /// Schema with every known column.
    pub fn full() -> Self {
        Self::new(CategoryField::ALL, NumericField::ALL)
    }

    pub fn has_category(&self, field: CategoryField) -> bool {
        self.categories.contains(&field)
    }

    pub fn has_numeric(&self, field: NumericField) -> bool {
        self.numerics.contains(&field)
    }

    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::Date => true,
            Column::Category(field) => self.has_category(field),
            Column::Numeric(field) => self.has_numeric(field),
        }
    }

    pub fn require_category(&self, field: CategoryField) -> PipelineResult<()> {
        if self.has_category(field) {
            Ok(())
        } else {
            Err(PipelineError::missing_column(field.tag()))
        }
    }

    pub fn require_numeric(&self, field: NumericField) -> PipelineResult<()> {
        if self.has_numeric(field) {
            Ok(())
        } else {
            Err(PipelineError::missing_column(field.tag()))
        }
    }

    /// Present columns in source file order.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::Date];
        columns.extend(
            CategoryField::ALL[..3]
                .iter()
                .copied()
                .filter(|f| self.has_category(*f))
                .map(Column::Category),
        );
        columns.extend(
            [NumericField::Latitude, NumericField::Longitude]
                .into_iter()
                .filter(|f| self.has_numeric(*f))
                .map(Column::Numeric),
        );
        columns.extend(
            CategoryField::ALL[3..]
                .iter()
                .copied()
                .filter(|f| self.has_category(*f))
                .map(Column::Category),
        );
        columns.extend(
            [NumericField::PricePhp, NumericField::PriceUsd]
                .into_iter()
                .filter(|f| self.has_numeric(*f))
                .map(Column::Numeric),
        );
        columns
    }
}

/// The loaded price table. Read-only once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<PriceRecord>,
    schema: Schema,
    checksum: Option<String>,
}

impl Dataset {
    pub fn new(records: Vec<PriceRecord>, schema: Schema) -> Self {
        Self {
            records,
            schema,
            checksum: None,
        }
    }

    /// Dataset whose schema declares every column.
    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        Self::new(records, Schema::full())
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fingerprint of the source bytes, when loaded from a file.
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unfiltered view over every record.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView::new(&self.schema, self.records.iter().collect())
    }

    /// Earliest and latest observation dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

/// A borrowed subsequence of a [`Dataset`], in source order.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    schema: &'a Schema,
    records: Vec<&'a PriceRecord>,
}

impl<'a> DatasetView<'a> {
    pub fn new(schema: &'a Schema, records: Vec<&'a PriceRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn records(&self) -> &[&'a PriceRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PriceRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(date, value)` pairs of a numeric column, skipping blank cells.
    pub fn series(&self, field: NumericField) -> PipelineResult<Vec<(NaiveDate, f64)>> {
        self.schema.require_numeric(field)?;
        Ok(self
            .iter()
            .filter_map(|r| r.numeric(field).map(|v| (r.date, v)))
            .collect())
    }
}
