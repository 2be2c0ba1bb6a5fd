use chrono::{Datelike, NaiveDate};
use dashboard::{
    aggregate, bootstrap, Category, DateFilter, DateWindow, FilterError, FilterSpec,
    GeneratorConfig, SalesGenerator, SalesStore, StoreError,
};

fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    )
}

fn select_all(today: NaiveDate) -> dashboard::ResolvedFilter {
    FilterSpec::default().resolve(today).unwrap()
}

#[test]
fn generating_twice_with_fixed_seed_is_identical() {
    let config = GeneratorConfig::new(42, 100, window((2024, 1, 1), (2024, 12, 31)));
    let first = SalesGenerator::new(config.clone())
        .unwrap()
        .generate()
        .unwrap();
    let second = SalesGenerator::new(config).unwrap().generate().unwrap();
    assert_eq!(first, second);
}

#[test]
fn seed_42_with_100_records_needs_no_corrections() {
    let config = GeneratorConfig::new(42, 100, window((2024, 1, 1), (2024, 12, 31)));
    let mut store = SalesStore::open_in_memory().unwrap();
    let report = bootstrap::initialize_store(&mut store, &config).unwrap();

    assert_eq!(report.generated, 100);
    assert_eq!(report.persisted, 100);
    assert_eq!(report.cleaning.total_dropped(), 0);
    assert_eq!(report.cleaning.total_substitutions(), 0);
    assert_eq!(report.cleaning.duplicates_removed, 0);
}

#[test]
fn select_all_filter_returns_the_full_record_set() {
    let config = GeneratorConfig::new(11, 250, window((2024, 1, 1), (2024, 12, 31)));
    let mut store = SalesStore::open_in_memory().unwrap();
    bootstrap::initialize_store(&mut store, &config).unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let records = store.query_records(&select_all(today)).unwrap();
    assert_eq!(records.len(), store.record_count().unwrap());
    assert_eq!(records.len(), 250);
}

#[test]
fn june_2024_filter_counts_exactly_the_june_records() {
    // Two-year dataset, one-month filter.
    let config = GeneratorConfig::new(9, 800, window((2024, 1, 1), (2025, 12, 31)));
    let mut store = SalesStore::open_in_memory().unwrap();
    bootstrap::initialize_store(&mut store, &config).unwrap();

    let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let everything = store.query_records(&select_all(today)).unwrap();
    let expected = everything
        .iter()
        .filter(|r| r.transaction_date.year() == 2024 && r.transaction_date.month() == 6)
        .count();

    let spec = FilterSpec {
        date_range: DateFilter::Range {
            start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        },
        ..FilterSpec::default()
    };
    let june = store.query_records(&spec.resolve(today).unwrap()).unwrap();
    let summary = aggregate::summarize(&june);

    assert_eq!(summary.record_count, expected);
}

#[test]
fn per_category_revenue_sums_to_the_ungrouped_total() {
    let config = GeneratorConfig::new(3, 600, window((2024, 1, 1), (2024, 12, 31)));
    let mut store = SalesStore::open_in_memory().unwrap();
    bootstrap::initialize_store(&mut store, &config).unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let records = store.query_records(&select_all(today)).unwrap();
    let summary = aggregate::summarize(&records);
    let rows = aggregate::breakdown_by_category(&records);

    // 600 uniform draws cover all five categories.
    assert!(rows.len() >= 3);
    let grouped: f64 = rows.iter().map(|row| row.revenue).sum();
    assert!((grouped - summary.total_revenue).abs() < 1e-6);
    let counted: usize = rows.iter().map(|row| row.record_count).sum();
    assert_eq!(counted, summary.record_count);
}

#[test]
fn inverted_date_bounds_are_rejected_before_querying() {
    let spec = FilterSpec {
        date_range: DateFilter::Range {
            start: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        },
        ..FilterSpec::default()
    };
    let result = spec.resolve(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert!(matches!(result, Err(FilterError::InvalidRange { .. })));
}

#[test]
fn querying_an_empty_store_reports_not_initialized() {
    let store = SalesStore::open_in_memory().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert_eq!(
        store.query_records(&select_all(today)).err(),
        Some(StoreError::NotInitialized)
    );
}

#[test]
fn empty_filtered_set_aggregates_to_zeroes() {
    let config = GeneratorConfig::new(13, 50, window((2024, 1, 1), (2024, 12, 31)));
    let mut store = SalesStore::open_in_memory().unwrap();
    bootstrap::initialize_store(&mut store, &config).unwrap();

    // A window with data, filtered down to a year holding none.
    let spec = FilterSpec {
        date_range: DateFilter::Range {
            start: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
        },
        ..FilterSpec::default()
    };
    let today = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
    let records = store.query_records(&spec.resolve(today).unwrap()).unwrap();

    assert!(records.is_empty());
    let summary = aggregate::summarize(&records);
    assert_eq!(summary.record_count, 0);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.avg_order_value, 0.0);
    assert!(aggregate::breakdown_by_category(&records).is_empty());
}

#[test]
fn filtering_by_category_only_returns_that_category() {
    let config = GeneratorConfig::new(17, 300, window((2024, 1, 1), (2024, 12, 31)));
    let mut store = SalesStore::open_in_memory().unwrap();
    bootstrap::initialize_store(&mut store, &config).unwrap();

    let spec = FilterSpec {
        categories: vec![Category::Electronics],
        ..FilterSpec::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let records = store.query_records(&spec.resolve(today).unwrap()).unwrap();

    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.category == Category::Electronics));
}
