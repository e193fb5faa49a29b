//! Column identifiers for the WFP price table.
//!
//! The source file uses HXL hashtags (`#adm1+name`, `#value`, ...) as its
//! header row. Each column is addressed by a typed field instead of its raw
//! tag so that a typo becomes a compile error rather than an empty chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// HXL tag of the observation date column.
pub const DATE_TAG: &str = "#date";

/// Display name of the observation date column.
pub const DATE_DISPLAY_NAME: &str = "Date";

/// Categorical (string) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Region,
    Subregion,
    Market,
    CommodityType,
    Commodity,
    Unit,
    PriceFlag,
    PriceType,
    Currency,
}

impl CategoryField {
    /// All categorical columns in source order.
    pub const ALL: [CategoryField; 9] = [
        CategoryField::Region,
        CategoryField::Subregion,
        CategoryField::Market,
        CategoryField::CommodityType,
        CategoryField::Commodity,
        CategoryField::Unit,
        CategoryField::PriceFlag,
        CategoryField::PriceType,
        CategoryField::Currency,
    ];

    /// HXL tag used in the source header.
    pub fn tag(self) -> &'static str {
        match self {
            CategoryField::Region => "#adm1+name",
            CategoryField::Subregion => "#adm2+name",
            CategoryField::Market => "#loc+market+name",
            CategoryField::CommodityType => "#item+type",
            CategoryField::Commodity => "#item+name",
            CategoryField::Unit => "#item+unit",
            CategoryField::PriceFlag => "#item+price+flag",
            CategoryField::PriceType => "#item+price+type",
            CategoryField::Currency => "#currency",
        }
    }

    /// Human-readable column name shown by the dashboard.
    pub fn display_name(self) -> &'static str {
        match self {
            CategoryField::Region => "Region",
            CategoryField::Subregion => "Subregion",
            CategoryField::Market => "Market Name",
            CategoryField::CommodityType => "Commodity Type",
            CategoryField::Commodity => "Commodity",
            CategoryField::Unit => "Unit",
            CategoryField::PriceFlag => "Price Flag",
            CategoryField::PriceType => "Price Type",
            CategoryField::Currency => "Currency",
        }
    }

    fn snake_name(self) -> &'static str {
        match self {
            CategoryField::Region => "region",
            CategoryField::Subregion => "subregion",
            CategoryField::Market => "market",
            CategoryField::CommodityType => "commodity_type",
            CategoryField::Commodity => "commodity",
            CategoryField::Unit => "unit",
            CategoryField::PriceFlag => "price_flag",
            CategoryField::PriceType => "price_type",
            CategoryField::Currency => "currency",
        }
    }

    /// Resolve a tag, display name or snake_case name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|f| {
            f.tag() == name
                || f.display_name().eq_ignore_ascii_case(name)
                || f.snake_name().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CategoryField {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            PipelineError::invalid_parameter("column", format!("unknown category column '{}'", s))
        })
    }
}

/// Numeric columns.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    #[default]
    PricePhp,
    PriceUsd,
    Latitude,
    Longitude,
}

impl NumericField {
    /// All numeric columns in source order.
    pub const ALL: [NumericField; 4] = [
        NumericField::Latitude,
        NumericField::Longitude,
        NumericField::PricePhp,
        NumericField::PriceUsd,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            NumericField::PricePhp => "#value",
            NumericField::PriceUsd => "#value+usd",
            NumericField::Latitude => "#geo+lat",
            NumericField::Longitude => "#geo+lon",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NumericField::PricePhp => "Price (PHP)",
            NumericField::PriceUsd => "Price (USD)",
            NumericField::Latitude => "Latitude",
            NumericField::Longitude => "Longitude",
        }
    }

    /// Whether the column holds a price (the only fields the aggregation
    /// widgets expose).
    pub fn is_price(self) -> bool {
        matches!(self, NumericField::PricePhp | NumericField::PriceUsd)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let lowered = name.to_ascii_lowercase();
        match lowered.as_str() {
            "php" | "price_php" => return Some(NumericField::PricePhp),
            "usd" | "price_usd" => return Some(NumericField::PriceUsd),
            "latitude" | "lat" => return Some(NumericField::Latitude),
            "longitude" | "lon" => return Some(NumericField::Longitude),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|f| f.tag() == name || f.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for NumericField {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            PipelineError::invalid_parameter("field", format!("unknown numeric column '{}'", s))
        })
    }
}

/// Any column of the table, used for projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "field")]
pub enum Column {
    Date,
    Category(CategoryField),
    Numeric(NumericField),
}

impl Column {
    pub fn tag(self) -> &'static str {
        match self {
            Column::Date => DATE_TAG,
            Column::Category(f) => f.tag(),
            Column::Numeric(f) => f.tag(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Column::Date => DATE_DISPLAY_NAME,
            Column::Category(f) => f.display_name(),
            Column::Numeric(f) => f.display_name(),
        }
    }

    /// Resolve a tag or display name to a column.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed == DATE_TAG || trimmed.eq_ignore_ascii_case(DATE_DISPLAY_NAME) {
            return Some(Column::Date);
        }
        CategoryField::from_name(trimmed)
            .map(Column::Category)
            .or_else(|| NumericField::from_name(trimmed).map(Column::Numeric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_tag_and_display_name() {
        assert_eq!(CategoryField::from_name("#adm1+name"), Some(CategoryField::Region));
        assert_eq!(CategoryField::from_name("Market Name"), Some(CategoryField::Market));
        assert_eq!(
            CategoryField::from_name("commodity_type"),
            Some(CategoryField::CommodityType)
        );
        assert_eq!(CategoryField::from_name("nonsense"), None);
    }

    #[test]
    fn test_category_from_str_error() {
        let err = "Planet".parse::<CategoryField>().unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_numeric_aliases() {
        assert_eq!("usd".parse::<NumericField>().unwrap(), NumericField::PriceUsd);
        assert_eq!("#value".parse::<NumericField>().unwrap(), NumericField::PricePhp);
        assert_eq!(
            "Price (USD)".parse::<NumericField>().unwrap(),
            NumericField::PriceUsd
        );
        assert!(NumericField::PricePhp.is_price());
        assert!(!NumericField::Latitude.is_price());
    }

    #[test]
    fn test_column_resolution() {
        assert_eq!(Column::from_name("Date"), Some(Column::Date));
        assert_eq!(
            Column::from_name("Price (PHP)"),
            Some(Column::Numeric(NumericField::PricePhp))
        );
        assert_eq!(
            Column::from_name("Region"),
            Some(Column::Category(CategoryField::Region))
        );
        assert_eq!(Column::from_name("Color"), None);
    }

    #[test]
    fn test_tags_are_unique() {
        let mut tags: Vec<&str> = CategoryField::ALL.iter().map(|f| f.tag()).collect();
        tags.extend(NumericField::ALL.iter().map(|f| f.tag()));
        tags.push(DATE_TAG);
        let count = tags.len();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), count);
    }
}
