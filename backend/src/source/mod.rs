//! Dataset loading.
//!
//! A [`DatasetSource`] produces the price table; the [`DatasetCache`] makes
//! sure it is read at most once per process and shared read-only afterwards.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  HTTP handlers / callers     │
//! └──────────────┬───────────────┘
//!                │ Arc<Dataset>
//! ┌──────────────▼───────────────┐
//! │  DatasetCache (load once)    │
//! └──────────────┬───────────────┘
//!                │
//!     ┌──────────┴───────────┐
//!     │                      │
//! CsvFileSource        InMemorySource
//! ```

pub mod cache;
pub mod checksum;
pub mod csv_file;
pub mod memory;

pub use cache::DatasetCache;
pub use checksum::calculate_checksum;
pub use csv_file::{parse_date, parse_price_csv, CsvFileSource, DEFAULT_PREAMBLE_ROWS};
pub use memory::InMemorySource;

use crate::error::PipelineResult;
use crate::models::Dataset;

/// Something that can produce the full price table.
pub trait DatasetSource: Send + Sync {
    /// Read and parse the whole table.
    fn load(&self) -> PipelineResult<Dataset>;

    /// Short description for logs, e.g. `csv:data/prices.csv`.
    fn describe(&self) -> String;
}
