//! In-memory dataset source for tests and local development.

use super::DatasetSource;
use crate::error::PipelineResult;
use crate::models::{Dataset, PriceRecord, Schema};

/// Serves a fixed set of records without touching the filesystem.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    records: Vec<PriceRecord>,
    schema: Schema,
}

impl InMemorySource {
    /// Records with a schema that declares every column.
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self::with_schema(records, Schema::full())
    }

    pub fn with_schema(records: Vec<PriceRecord>, schema: Schema) -> Self {
        Self { records, schema }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::with_schema(dataset.records().to_vec(), dataset.schema().clone())
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> PipelineResult<Dataset> {
        Ok(Dataset::new(self.records.clone(), self.schema.clone()))
    }

    fn describe(&self) -> String {
        format!("memory:{} records", self.records.len())
    }
}
