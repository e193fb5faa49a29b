//! Error types for the price pipeline.
//!
//! Every failure is recoverable at the request boundary. The presentation
//! layer maps each variant to a widget state (see [`PipelineError::is_empty_state`]
//! and [`PipelineError::is_data_unavailable`]) so one failing widget never
//! takes the rest of a page down with it.

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for loading, filtering, aggregating and resampling price data.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A referenced column is not present in the loaded table.
    #[error("Missing column: {column} is not present in the dataset")]
    MissingColumn { column: String },

    /// The current selection left nothing to compute a statistic over.
    #[error("Empty selection: no records match ({operation})")]
    EmptySelection { operation: String },

    /// Unsupported resampling bucket.
    #[error("Invalid granularity '{value}'. Use daily, monthly, quarterly or yearly")]
    InvalidGranularity { value: String },

    /// Percentile outside of [0, 100].
    #[error("Invalid percentile {value}: must be within [0, 100]")]
    InvalidPercentile { value: f64 },

    /// Any other rejected request parameter.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Reading the source file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The source file is not valid delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell could not be converted to its column type.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Configuration file or environment is invalid.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl PipelineError {
    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an empty selection error for the named operation.
    pub fn empty(operation: impl Into<String>) -> Self {
        Self::EmptySelection {
            operation: operation.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the error means "nothing to show" rather than a failure.
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::EmptySelection { .. })
    }

    /// True when the underlying data cannot serve the request at all.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. }
                | Self::Io { .. }
                | Self::Csv(_)
                | Self::Parse { .. }
                | Self::Configuration { .. }
        )
    }

    /// True when the caller supplied a bad request parameter.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidGranularity { .. }
                | Self::InvalidPercentile { .. }
                | Self::InvalidParameter { .. }
        )
    }
}
