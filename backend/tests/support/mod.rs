#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use food_prices::models::{Dataset, PriceRecord};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Header rows of a WFP export: human-readable names, then HXL tags.
pub const EXPORT_HEADER: &str = "\
date,admin1,admin2,market,latitude,longitude,category,commodity,unit,priceflag,pricetype,currency,price,usdprice
#date,#adm1+name,#adm2+name,#loc+market+name,#geo+lat,#geo+lon,#item+type,#item+name,#item+unit,#item+price+flag,#item+price+type,#currency,#value,#value+usd
";

/// Twelve observations over three regions and two years. Category and
/// commodity names are quoted where they contain commas, as in the real export.
pub const EXPORT_ROWS: &str = "\
2020-01-15,National Capital region,Metropolitan Manila,Pasay City,14.54,121.0,cereals and tubers,\"Rice (regular, milled)\",KG,actual,Retail,PHP,40.0,0.79
2020-01-15,National Capital region,Metropolitan Manila,Pasay City,14.54,121.0,cereals and tubers,\"Rice (regular, milled)\",KG,actual,Wholesale,PHP,34.0,0.67
2020-02-15,National Capital region,Metropolitan Manila,Pasay City,14.54,121.0,\"meat, fish and eggs\",Fish,KG,actual,Retail,PHP,160.0,3.15
2020-04-15,Region III,Bulacan,Malolos,14.84,120.81,vegetables and fruits,Onions,KG,actual,Retail,PHP,95.0,1.87
2020-04-15,Region III,Bulacan,Malolos,14.84,120.81,vegetables and fruits,Onions,KG,actual,Wholesale,PHP,80.0,1.58
2020-07-15,Region III,Bulacan,Malolos,14.84,120.81,cereals and tubers,\"Rice (regular, milled)\",KG,actual,Retail,PHP,41.0,0.81
2020-10-15,Cordillera Administrative region,Benguet,La Trinidad,16.46,120.59,vegetables and fruits,Cabbage,KG,actual,Retail,PHP,55.0,1.08
2021-01-15,Cordillera Administrative region,Benguet,La Trinidad,16.46,120.59,vegetables and fruits,Cabbage,KG,actual,Wholesale,PHP,45.0,0.89
2021-03-15,National Capital region,Metropolitan Manila,Pasay City,14.54,121.0,miscellaneous food,Sugar,KG,actual,Retail,PHP,52.0,1.03
2021-06-15,Region III,Bulacan,Malolos,14.84,120.81,\"meat, fish and eggs\",Fish,KG,actual,Wholesale,PHP,150.0,2.96
2021-09-15,Cordillera Administrative region,Benguet,La Trinidad,16.46,120.59,cereals and tubers,\"Rice (regular, milled)\",KG,actual,Retail,PHP,43.0,0.85
2021-12-15,National Capital region,Metropolitan Manila,Pasay City,14.54,121.0,miscellaneous food,Sugar,KG,actual,Wholesale,PHP,,
";

/// Sum of every non-blank `#value` in [`EXPORT_ROWS`].
pub const EXPORT_TOTAL_PHP: f64 = 795.0;

pub fn sample_export() -> String {
    format!("{}{}", EXPORT_HEADER, EXPORT_ROWS)
}

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A/Rice/10/2020-01-01, A/Rice/20/2020-02-01, B/Corn/30/2020-01-15
pub fn scenario_dataset() -> Dataset {
    Dataset::from_records(vec![
        PriceRecord::new(date(2020, 1, 1), "A", "Rice", 10.0),
        PriceRecord::new(date(2020, 2, 1), "A", "Rice", 20.0),
        PriceRecord::new(date(2020, 1, 15), "B", "Corn", 30.0),
    ])
}

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
