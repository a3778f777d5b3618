//! Workbook reading and source cache tests against real `.xlsx` files.

mod common;

use std::sync::Arc;

use stock_dashboard::config;
use stock_dashboard::loader::load_prices;
use stock_dashboard::source::{read_sheet, Cell};
use stock_dashboard::{DashboardError, SourceCache, SourceSpec};

// ---------------------------------------------------------------------------
// read_sheet
// ---------------------------------------------------------------------------

#[test]
fn read_sheet_returns_every_row() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_sample_workbook(tmp.path());

    let raw = read_sheet(&path, config::DEFAULT_SHEET).unwrap();
    assert_eq!(raw.rows.len(), common::ROW_COUNT + 2);
    assert_eq!(raw.rows[1][0], Cell::from("วันที่"));
    assert!(matches!(raw.rows[2][5], Cell::Number(_)));
}

#[test]
fn missing_sheet_lists_available_sheets() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_sample_workbook(tmp.path());

    let err = read_sheet(&path, "ADVANC").unwrap_err();
    match err {
        DashboardError::NotFound(msg) => assert!(msg.contains("TRUE")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_file_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let err = read_sheet(&tmp.path().join("nope.xlsx"), "TRUE").unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
}

#[test]
fn workbook_rows_load_like_in_memory_rows() {
    let tmp = tempfile::tempdir().unwrap();

    let mut rows = common::sample_rows();
    rows.push(common::header_row());
    rows.push(common::data_row("ไม่ระบุ", 0));
    let path = common::write_workbook(tmp.path(), "messy.xlsx", "TRUE", &rows);

    let raw = read_sheet(&path, "TRUE").unwrap();
    let series = load_prices(&raw, 1).unwrap();
    assert_eq!(series.len(), common::ROW_COUNT);
    assert_eq!(series.report.header_rows, 1);
    assert_eq!(series.report.unparseable_date, 1);
    assert_eq!(series.records, common::sample_series().records);
}

// ---------------------------------------------------------------------------
// SourceCache
// ---------------------------------------------------------------------------

#[test]
fn cache_loads_once() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = SourceSpec::new(common::write_sample_workbook(tmp.path()));

    let mut cache = SourceCache::new();
    let first = cache.get_or_load(&spec).unwrap();
    let second = cache.get_or_load(&spec).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.load_count(), 1);
    assert_eq!(cache.len(), 1);
    assert!(!cache.is_stale(&spec).unwrap());
}

#[test]
fn sheets_of_one_file_are_cached_separately() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_sample_workbook(tmp.path());

    let mut cache = SourceCache::new();
    cache.get_or_load(&SourceSpec::new(&path)).unwrap();
    let err = cache
        .get_or_load(&SourceSpec::new(&path).sheet("OTHER"))
        .unwrap_err();

    assert!(matches!(err, DashboardError::NotFound(_)));
    assert_eq!(cache.len(), 1);
}

#[test]
fn title_row_count_is_part_of_the_key() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_sample_workbook(tmp.path());

    let mut cache = SourceCache::new();
    let series = cache.get_or_load(&SourceSpec::new(&path).skip_rows(1)).unwrap();
    assert_eq!(series.len(), common::ROW_COUNT);

    // Without skipping, the title row becomes the header.
    let err = cache
        .get_or_load(&SourceSpec::new(&path).skip_rows(0))
        .unwrap_err();
    assert!(matches!(err, DashboardError::Schema(_)));
    assert_eq!(cache.load_count(), 1);
    assert!(!cache.contains(&SourceSpec::new(&path).skip_rows(0)));
    assert!(cache.contains(&SourceSpec::new(&path).skip_rows(1)));
}

#[test]
fn missing_file_through_cache_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = SourceSpec::new(tmp.path().join("gone.xlsx"));

    let mut cache = SourceCache::new();
    let err = cache.get_or_load(&spec).unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
    assert!(cache.is_empty());
}

#[test]
fn deleted_file_is_not_found_on_staleness_check() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_sample_workbook(tmp.path());
    let spec = SourceSpec::new(&path);

    let mut cache = SourceCache::new();
    cache.get_or_load(&spec).unwrap();
    let key_before = spec.key();
    std::fs::remove_file(&path).unwrap();

    // The key was canonical while the file existed; ask with that path.
    let spec = SourceSpec::new(key_before.path);
    assert!(matches!(
        cache.get_or_load(&spec).unwrap_err(),
        DashboardError::NotFound(_)
    ));
}

#[test]
fn rewritten_file_is_stale_and_reloaded() {
    let tmp = tempfile::tempdir().unwrap();
    let path = common::write_sample_workbook(tmp.path());
    let spec = SourceSpec::new(&path);

    let mut cache = SourceCache::new();
    assert_eq!(cache.get_or_load(&spec).unwrap().len(), common::ROW_COUNT);

    let mut rows = common::sample_rows();
    rows.push(common::data_row(&common::thai_date(2025, 5, 20), 20));
    common::write_workbook(tmp.path(), "prices.xlsx", "TRUE", &rows);

    assert!(cache.is_stale(&spec).unwrap());
    assert_eq!(cache.get_or_load(&spec).unwrap().len(), common::ROW_COUNT + 1);
    assert_eq!(cache.load_count(), 2);
}

#[test]
fn invalidate_and_clear() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = SourceSpec::new(common::write_sample_workbook(tmp.path()));

    let mut cache = SourceCache::new();
    cache.get_or_load(&spec).unwrap();
    assert!(cache.contains(&spec));

    assert!(cache.invalidate(&spec));
    assert!(!cache.invalidate(&spec));
    assert!(cache.is_stale(&spec).unwrap());

    cache.get_or_load(&spec).unwrap();
    assert_eq!(cache.load_count(), 2);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn bad_header_is_schema_error() {
    let tmp = tempfile::tempdir().unwrap();
    let rows = vec![
        vec![Cell::from("title")],
        vec![Cell::from("วันที่"), Cell::from("ราคาปิด")],
        common::data_row(&common::thai_date(2025, 1, 2), 0),
    ];
    let path = common::write_workbook(tmp.path(), "short.xlsx", "TRUE", &rows);

    let mut cache = SourceCache::new();
    let err = cache.get_or_load(&SourceSpec::new(path)).unwrap_err();
    assert!(matches!(err, DashboardError::Schema(_)));
    assert!(cache.is_empty());
}
