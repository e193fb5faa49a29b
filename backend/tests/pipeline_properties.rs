//! Property-based tests for the filter → aggregate → resample pipeline.
//!
//! Prices are whole numbers so sums are exact and can be compared with `==`.

mod support;

use std::collections::BTreeSet;

use proptest::prelude::*;

use food_prices::models::{
    CategoryField, Dataset, FilterSelection, NumericField, PriceRecord, Selection,
};
use food_prices::services::{
    bottom_k, filter, group_total, median, percentile, price_trend, top_k, total, Granularity,
    Reducer,
};
use support::{date, scenario_dataset};

const REGIONS: [&str; 4] = ["NCR", "Region III", "CAR", "Region VII"];
const COMMODITIES: [&str; 5] = ["Rice", "Fish", "Onions", "Sugar", "Beans"];
const PHP: NumericField = NumericField::PricePhp;

fn record_strategy() -> impl Strategy<Value = PriceRecord> {
    (
        0..REGIONS.len(),
        0..COMMODITIES.len(),
        2019i32..2023,
        1u32..=12,
        1u32..=28,
        1u32..10_000,
    )
        .prop_map(|(region, commodity, year, month, day, price)| {
            PriceRecord::new(
                date(year, month, day),
                REGIONS[region],
                COMMODITIES[commodity],
                f64::from(price),
            )
        })
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(record_strategy(), 1..80).prop_map(Dataset::from_records)
}

fn selection_strategy(values: &'static [&'static str]) -> impl Strategy<Value = Selection> {
    prop_oneof![
        Just(Selection::All),
        prop::collection::btree_set(prop::sample::select(values), 0..values.len())
            .prop_map(Selection::only),
    ]
}

fn granularity_strategy() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Daily),
        Just(Granularity::Monthly),
        Just(Granularity::Quarterly),
        Just(Granularity::Yearly),
    ]
}

proptest! {
    #[test]
    fn filter_never_grows_and_only_keeps_selected(
        dataset in dataset_strategy(),
        regions in selection_strategy(&REGIONS),
        commodities in selection_strategy(&COMMODITIES),
    ) {
        let selection = FilterSelection::new(regions.clone(), commodities.clone());
        let view = filter(&dataset, &selection).unwrap();

        prop_assert!(view.len() <= dataset.len());
        for record in view.iter() {
            prop_assert!(regions.matches(&record.region));
            prop_assert!(commodities.matches(&record.commodity));
        }
        let kept = dataset
            .records()
            .iter()
            .filter(|r| regions.matches(&r.region) && commodities.matches(&r.commodity))
            .count();
        prop_assert_eq!(view.len(), kept);
    }

    #[test]
    fn all_all_is_identity(dataset in dataset_strategy()) {
        let view = filter(&dataset, &FilterSelection::all()).unwrap();

        prop_assert_eq!(view.len(), dataset.len());
        for (kept, original) in view.iter().zip(dataset.records()) {
            prop_assert!(std::ptr::eq(kept, original));
        }
    }

    #[test]
    fn totals_add_over_a_partition(dataset in dataset_strategy(), split in 1usize..REGIONS.len()) {
        let (left, right) = REGIONS.split_at(split);
        let total_of = |regions: &[&str]| {
            let view = filter(
                &dataset,
                &FilterSelection::new(Selection::only(regions.iter().copied()), Selection::All),
            )
            .unwrap();
            total(&view, PHP).unwrap_or(0.0)
        };

        let whole = total(&dataset.view(), PHP).unwrap();
        prop_assert_eq!(total_of(left) + total_of(right), whole);

        let groups = group_total(&dataset.view(), &[CategoryField::Region], PHP).unwrap();
        prop_assert_eq!(groups.iter().map(|g| g.value).sum::<f64>(), whole);
    }

    #[test]
    fn median_is_fiftieth_percentile(dataset in dataset_strategy()) {
        let view = dataset.view();
        prop_assert_eq!(percentile(&view, PHP, 50.0).unwrap(), median(&view, PHP).unwrap());

        let p25 = percentile(&view, PHP, 25.0).unwrap();
        let p75 = percentile(&view, PHP, 75.0).unwrap();
        prop_assert!(p25 <= p75);
    }

    #[test]
    fn resampling_is_ordered_and_exhaustive(
        dataset in dataset_strategy(),
        granularity in granularity_strategy(),
    ) {
        let series = price_trend(&dataset.view(), PHP, granularity, Reducer::Sum).unwrap();

        prop_assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));

        let buckets: BTreeSet<_> = series.points.iter().map(|p| p.date).collect();
        for record in dataset.records() {
            prop_assert!(buckets.contains(&granularity.bucket_start(record.date)));
        }

        let bucket_sum: f64 = series.points.iter().map(|p| p.value).sum();
        prop_assert_eq!(bucket_sum, total(&dataset.view(), PHP).unwrap());
    }

    #[test]
    fn top_and_bottom_rankings_do_not_overlap(dataset in dataset_strategy(), k in 1usize..3) {
        let view = dataset.view();
        let groups = group_total(&view, &[CategoryField::Commodity], PHP).unwrap().len();
        prop_assume!(2 * k <= groups);

        let top = top_k(&view, CategoryField::Commodity, PHP, k).unwrap();
        let bottom = bottom_k(&view, CategoryField::Commodity, PHP, k).unwrap();

        let top_keys: BTreeSet<_> = top.iter().map(|g| g.key.clone()).collect();
        prop_assert!(bottom.iter().all(|g| !top_keys.contains(&g.key)));

        let max_bottom = bottom.iter().map(|g| g.value).fold(f64::MIN, f64::max);
        let min_top = top.iter().map(|g| g.value).fold(f64::MAX, f64::min);
        prop_assert!(max_bottom <= min_top);
    }

    #[test]
    fn empty_selection_is_empty_state(dataset in dataset_strategy()) {
        let view = filter(
            &dataset,
            &FilterSelection::new(Selection::only(Vec::<String>::new()), Selection::All),
        )
        .unwrap();

        prop_assert!(view.is_empty());
        prop_assert!(total(&view, PHP).unwrap_err().is_empty_state());
        prop_assert!(price_trend(&view, PHP, Granularity::Monthly, Reducer::Sum)
            .unwrap_err()
            .is_empty_state());
    }
}

#[test]
fn scenario_region_a_and_yearly_sum() {
    let dataset = scenario_dataset();
    let view = filter(
        &dataset,
        &FilterSelection::new(Selection::only(["A"]), Selection::All),
    )
    .unwrap();

    assert_eq!(view.len(), 2);
    assert_eq!(total(&view, PHP).unwrap(), 30.0);
    assert_eq!(median(&view, PHP).unwrap(), 15.0);

    let yearly = price_trend(&dataset.view(), PHP, Granularity::Yearly, Reducer::Sum).unwrap();
    assert_eq!(yearly.points.len(), 1);
    assert_eq!(yearly.points[0].date, date(2020, 1, 1));
    assert_eq!(yearly.points[0].value, 60.0);
}
