//! Shared datasets for unit tests.

use chrono::NaiveDate;

use crate::models::{Dataset, PriceRecord};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three records: two Rice observations in region A, one Corn in region B.
pub(crate) fn scenario_dataset() -> Dataset {
    Dataset::from_records(vec![
        PriceRecord::new(date(2020, 1, 1), "A", "Rice", 10.0),
        PriceRecord::new(date(2020, 2, 1), "A", "Rice", 20.0),
        PriceRecord::new(date(2020, 1, 15), "B", "Corn", 30.0),
    ])
}

/// A small market sample spanning several commodities, price types and years.
pub(crate) fn market_dataset() -> Dataset {
    let rows = [
        ("2019-03-15", "NCR", "Rice", "cereals and tubers", "Retail", 38.0),
        ("2019-03-15", "NCR", "Rice", "cereals and tubers", "Wholesale", 32.0),
        ("2019-07-15", "NCR", "Fish", "meat, fish and eggs", "Retail", 160.0),
        ("2019-11-15", "Region III", "Onions", "vegetables and fruits", "Retail", 90.0),
        ("2020-01-15", "Region III", "Rice", "cereals and tubers", "Retail", 40.0),
        ("2020-01-15", "Region III", "Onions", "vegetables and fruits", "Wholesale", 70.0),
        ("2020-05-15", "CAR", "Fish", "meat, fish and eggs", "Wholesale", 140.0),
        ("2020-05-15", "CAR", "Sugar", "miscellaneous food", "Retail", 50.0),
        ("2021-02-15", "CAR", "Sugar", "miscellaneous food", "Wholesale", 44.0),
        ("2021-08-15", "NCR", "Beans", "pulses and nuts", "Retail", 85.0),
    ];

    Dataset::from_records(
        rows.iter()
            .map(|(day, region, commodity, kind, price_type, price)| {
                let day = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
                PriceRecord::new(day, *region, *commodity, *price)
                    .with_commodity_type(*kind)
                    .with_price_type(*price_type)
                    .with_price_usd(price / 50.0)
            })
            .collect(),
    )
}
