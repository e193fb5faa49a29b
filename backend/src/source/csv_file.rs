//! CSV ingestion for the WFP price export.
//!
//! The export starts with a human-readable header line followed by a row of
//! HXL hashtags. The hashtag row is the one the pipeline keys on, so the
//! loader skips `preamble_rows` leading rows and treats the next row as the
//! header.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::checksum::calculate_checksum;
use super::DatasetSource;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{CategoryField, Dataset, NumericField, PriceRecord, Schema, DATE_TAG};

/// Rows to skip before the hashtag header in the published export.
pub const DEFAULT_PREAMBLE_ROWS: usize = 1;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse an observation date, accepting the formats seen in WFP exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Column positions resolved from the header row.
struct HeaderLayout {
    date: usize,
    categories: Vec<(CategoryField, usize)>,
    numerics: Vec<(NumericField, usize)>,
}

impl HeaderLayout {
    fn from_header(header: &StringRecord) -> PipelineResult<Self> {
        let position = |tag: &str| header.iter().position(|h| h == tag);

        let date = position(DATE_TAG).ok_or_else(|| PipelineError::missing_column(DATE_TAG))?;
        let categories = CategoryField::ALL
            .into_iter()
            .filter_map(|f| position(f.tag()).map(|idx| (f, idx)))
            .collect();
        let numerics = NumericField::ALL
            .into_iter()
            .filter_map(|f| position(f.tag()).map(|idx| (f, idx)))
            .collect();

        Ok(Self {
            date,
            categories,
            numerics,
        })
    }

    fn schema(&self) -> Schema {
        Schema::new(
            self.categories.iter().map(|(f, _)| *f),
            self.numerics.iter().map(|(f, _)| *f),
        )
    }

    fn parse_row(&self, row: &StringRecord) -> PipelineResult<PriceRecord> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw_date = row.get(self.date).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| PipelineError::Parse {
            line,
            message: format!("invalid date '{}'", raw_date),
        })?;

        let mut record = PriceRecord {
            date,
            region: String::new(),
            subregion: String::new(),
            market: String::new(),
            latitude: None,
            longitude: None,
            commodity_type: String::new(),
            commodity: String::new(),
            unit: String::new(),
            price_flag: String::new(),
            price_type: String::new(),
            currency: String::new(),
            price_php: None,
            price_usd: None,
        };

        for (field, idx) in &self.categories {
            let value = row.get(*idx).unwrap_or("").to_string();
            match field {
                CategoryField::Region => record.region = value,
                CategoryField::Subregion => record.subregion = value,
                CategoryField::Market => record.market = value,
                CategoryField::CommodityType => record.commodity_type = value,
                CategoryField::Commodity => record.commodity = value,
                CategoryField::Unit => record.unit = value,
                CategoryField::PriceFlag => record.price_flag = value,
                CategoryField::PriceType => record.price_type = value,
                CategoryField::Currency => record.currency = value,
            }
        }

        for (field, idx) in &self.numerics {
            let value = parse_number(row.get(*idx).unwrap_or(""), *field, line)?;
            match field {
                NumericField::PricePhp => record.price_php = value,
                NumericField::PriceUsd => record.price_usd = value,
                NumericField::Latitude => record.latitude = value,
                NumericField::Longitude => record.longitude = value,
            }
        }

        Ok(record)
    }
}

fn parse_number(raw: &str, field: NumericField, line: u64) -> PipelineResult<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(PipelineError::Parse {
            line,
            message: format!("invalid number '{}' in {}", raw, field.tag()),
        }),
    }
}

/// Parse a WFP price export into a [`Dataset`].
pub fn parse_price_csv<R: Read>(reader: R, preamble_rows: usize) -> PipelineResult<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut rows = rdr.records();

    for _ in 0..preamble_rows {
        if rows.next().transpose()?.is_none() {
            return Err(PipelineError::Parse {
                line: 0,
                message: "file ended inside the preamble".to_string(),
            });
        }
    }

    let header = rows.next().transpose()?.ok_or_else(|| PipelineError::Parse {
        line: preamble_rows as u64 + 1,
        message: "missing header row".to_string(),
    })?;
    let layout = HeaderLayout::from_header(&header)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(layout.parse_row(&row?)?);
    }

    Ok(Dataset::new(records, layout.schema()))
}

/// Dataset source backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    preamble_rows: usize,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            preamble_rows: DEFAULT_PREAMBLE_ROWS,
        }
    }

    pub fn with_preamble_rows(mut self, preamble_rows: usize) -> Self {
        self.preamble_rows = preamble_rows;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvFileSource {
    fn load(&self) -> PipelineResult<Dataset> {
        let bytes = fs::read(&self.path).map_err(|source| PipelineError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let checksum = calculate_checksum(&bytes);
        let dataset = parse_price_csv(bytes.as_slice(), self.preamble_rows)?.with_checksum(checksum);

        log::info!(
            "Loaded {} price records from {} (sha256 {})",
            dataset.len(),
            self.path.display(),
            dataset.checksum().unwrap_or_default()
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
