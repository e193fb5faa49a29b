use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{CategoryField, Column, NumericField};

/// One observation of the price table.
///
/// Numeric cells can be blank in the source file; they are kept as `None`
/// and skipped by every statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub region: String,
    pub subregion: String,
    pub market: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub commodity_type: String,
    pub commodity: String,
    pub unit: String,
    pub price_flag: String,
    pub price_type: String,
    pub currency: String,
    pub price_php: Option<f64>,
    pub price_usd: Option<f64>,
}

impl PriceRecord {
    /// Create a record with the fields the filters care about; the rest stay blank.
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        commodity: impl Into<String>,
        price_php: f64,
    ) -> Self {
        Self {
            date,
            region: region.into(),
            subregion: String::new(),
            market: String::new(),
            latitude: None,
            longitude: None,
            commodity_type: String::new(),
            commodity: commodity.into(),
            unit: String::new(),
            price_flag: String::new(),
            price_type: String::new(),
            currency: "PHP".to_string(),
            price_php: Some(price_php),
            price_usd: None,
        }
    }

    pub fn with_commodity_type(mut self, commodity_type: impl Into<String>) -> Self {
        self.commodity_type = commodity_type.into();
        self
    }

    pub fn with_price_type(mut self, price_type: impl Into<String>) -> Self {
        self.price_type = price_type.into();
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn with_price_usd(mut self, price_usd: f64) -> Self {
        self.price_usd = Some(price_usd);
        self
    }

    /// Value of a categorical column.
    pub fn category(&self, field: CategoryField) -> &str {
        match field {
            CategoryField::Region => &self.region,
            CategoryField::Subregion => &self.subregion,
            CategoryField::Market => &self.market,
            CategoryField::CommodityType => &self.commodity_type,
            CategoryField::Commodity => &self.commodity,
            CategoryField::Unit => &self.unit,
            CategoryField::PriceFlag => &self.price_flag,
            CategoryField::PriceType => &self.price_type,
            CategoryField::Currency => &self.currency,
        }
    }

    /// Value of a numeric column, `None` when the cell was blank.
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::PricePhp => self.price_php,
            NumericField::PriceUsd => self.price_usd,
            NumericField::Latitude => self.latitude,
            NumericField::Longitude => self.longitude,
        }
    }

    /// Cell rendered as text for tabular previews.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Date => self.date.format("%Y-%m-%d").to_string(),
            Column::Category(field) => self.category(field).to_string(),
            Column::Numeric(field) => self
                .numeric(field)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}
