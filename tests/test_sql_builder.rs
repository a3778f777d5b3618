//! Unit tests for the SqlBuilder query construction.

use stock_dashboard::SqlBuilder;

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("prices").build();
    assert_eq!(sql, "SELECT *\nFROM prices");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("prices")
        .select(&["date", "close"])
        .build();
    assert!(sql.starts_with("SELECT date, close\n"));
}

#[test]
fn distinct_is_added_to_select() {
    let (sql, _) = SqlBuilder::new("prices")
        .select(&["strftime(date, '%Y-%m') AS month"])
        .distinct()
        .build();
    assert!(sql.starts_with("SELECT DISTINCT strftime(date, '%Y-%m') AS month\n"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_clause_keeps_placeholders_and_params() {
    let (sql, params) = SqlBuilder::new("prices")
        .where_clause("date >= CAST(? AS DATE)", &["2025-01-01"])
        .build();
    assert!(sql.contains("WHERE date >= CAST(? AS DATE)"));
    assert_eq!(params, vec!["2025-01-01"]);
}

#[test]
fn multiple_conditions_are_and_combined_in_order() {
    let (sql, params) = SqlBuilder::new("prices")
        .where_clause("date >= CAST(? AS DATE)", &["2025-01-01"])
        .where_clause("date <= CAST(? AS DATE)", &["2025-03-31"])
        .build();
    assert!(sql.contains("WHERE date >= CAST(? AS DATE) AND date <= CAST(? AS DATE)"));
    assert_eq!(params, vec!["2025-01-01", "2025-03-31"]);
}

#[test]
fn values_are_never_interpolated() {
    let (sql, params) = SqlBuilder::new("prices")
        .where_clause("strftime(date, '%Y-%m') = ?", &["2025-01'; DROP TABLE prices; --"])
        .build();
    assert!(!sql.contains("DROP TABLE"));
    assert_eq!(params.len(), 1);
}

// ---------------------------------------------------------------------------
// ORDER BY / LIMIT
// ---------------------------------------------------------------------------

#[test]
fn order_by_accumulates_clauses() {
    let (sql, _) = SqlBuilder::new("prices")
        .order_by(&["date DESC"])
        .order_by(&["close ASC"])
        .build();
    assert!(sql.contains("ORDER BY date DESC, close ASC"));
}

#[test]
fn limit_is_appended() {
    let (sql, _) = SqlBuilder::new("prices").limit(1).build();
    assert!(sql.ends_with("LIMIT 1"));
}

#[test]
fn full_query_orders_clauses() {
    let (sql, params) = SqlBuilder::new("prices")
        .select(&["date", "close"])
        .where_clause("close > CAST(? AS DOUBLE)", &["3.5"])
        .order_by(&["date DESC"])
        .limit(5)
        .build();

    let select = sql.find("SELECT").unwrap();
    let from = sql.find("FROM").unwrap();
    let where_ = sql.find("WHERE").unwrap();
    let order = sql.find("ORDER BY").unwrap();
    let limit = sql.find("LIMIT").unwrap();
    assert!(select < from && from < where_ && where_ < order && order < limit);
    assert_eq!(params, vec!["3.5"]);
}
