//! DuckDB connection wrapper holding the loaded price table.
//!
//! The configured source is loaded through the [`SourceCache`] and registered
//! as the `prices` table on first query. When the cache hands back a
//! different series (the file changed), the table is rebuilt.

use crate::cache::SourceCache;
use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{LoadReport, PriceSeries};
use crate::source::SourceSpec;
use chrono::NaiveDate;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Wraps a DuckDB connection and the price table registered in it.
pub struct Connection {
    conn: DuckDbConnection,
    /// The cache used to load workbooks.
    pub cache: RefCell<SourceCache>,
    source: Option<SourceSpec>,
    current: RefCell<Option<Arc<PriceSeries>>>,
    registered_tables: RefCell<HashSet<String>>,
}

impl Connection {
    /// Create a connection backed by the given cache.
    ///
    /// Opens an in-memory DuckDB database. With `source` set, the price table
    /// is loaded from it lazily; without one, callers register a series with
    /// [`register_prices`](Self::register_prices).
    pub fn new(cache: SourceCache, source: Option<SourceSpec>) -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            cache: RefCell::new(cache),
            source,
            current: RefCell::new(None),
            registered_tables: RefCell::new(HashSet::new()),
        })
    }

    /// The configured workbook source, if any.
    pub fn source(&self) -> Option<&SourceSpec> {
        self.source.as_ref()
    }

    /// Ensure the `prices` table reflects the current source.
    pub fn ensure_prices(&self) -> Result<()> {
        let Some(spec) = &self.source else {
            if self.has_table(config::PRICES_TABLE) {
                return Ok(());
            }
            return Err(DashboardError::NotFound(
                "No price source configured and no price table registered".to_string(),
            ));
        };

        let series = self.cache.borrow_mut().get_or_load(spec)?;
        let unchanged = self
            .current
            .borrow()
            .as_ref()
            .map(|cur| Arc::ptr_eq(cur, &series))
            .unwrap_or(false);

        if !unchanged || !self.has_table(config::PRICES_TABLE) {
            self.register_series(series)?;
        }
        Ok(())
    }

    /// Replace the `prices` table with the records of `series`.
    pub fn register_prices(&self, series: &PriceSeries) -> Result<()> {
        self.register_series(Arc::new(series.clone()))
    }

    /// The currently registered series, if any.
    pub fn series(&self) -> Option<Arc<PriceSeries>> {
        self.current.borrow().clone()
    }

    /// Load report of the currently registered series.
    pub fn load_report(&self) -> Option<LoadReport> {
        self.current.borrow().as_ref().map(|s| s.report.clone())
    }

    fn register_series(&self, series: Arc<PriceSeries>) -> Result<()> {
        let table = config::PRICES_TABLE;
        let column_defs: Vec<String> = config::price_columns()
            .iter()
            .map(|(name, ty)| format!("\"{}\" {}", name, ty))
            .collect();
        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} ({})",
            table,
            column_defs.join(", ")
        ))?;

        if !series.is_empty() {
            let mut file = NamedTempFile::new()?;
            for record in &series.records {
                writeln!(file, "{}", serde_json::to_string(record)?)?;
            }
            file.flush()?;

            let columns: Vec<String> = config::price_columns()
                .iter()
                .map(|(name, ty)| format!("'{}': '{}'", name, ty))
                .collect();
            let path_fwd = file.path().to_string_lossy().replace('\\', "/");
            self.conn.execute_batch(&format!(
                "INSERT INTO {} SELECT * FROM read_json('{}', format='newline_delimited', columns={{{}}})",
                table,
                path_fwd,
                columns.join(", ")
            ))?;
        }

        self.registered_tables.borrow_mut().insert(table.to_string());
        tracing::info!(table, rows = series.len(), "registered price table");
        *self.current.borrow_mut() = Some(series);
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// Automatically converts DuckDB types to `serde_json::Value`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run
        let (column_names, column_count) = match rows_result.as_ref() {
            Some(s) => (
                s.column_names()
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>(),
                s.column_count(),
            ),
            None => (Vec::new(), 0),
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::new();
            for (i, col_name) in column_names.iter().enumerate().take(column_count) {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            let value = convert_value_ref(row.get_ref(0)?);
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Check whether a table has been registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registered_tables.borrow().contains(name)
    }

    /// Return a list of all registered table names.
    pub fn tables(&self) -> Vec<String> {
        self.registered_tables.borrow().iter().cloned().collect()
    }

    /// Forget registered tables so the price table is rebuilt on next access.
    pub fn reset_tables(&self) {
        self.registered_tables.borrow_mut().clear();
        *self.current.borrow_mut() = None;
    }

}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Date32(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(days as i64)))
            .map(|d| serde_json::Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(serde_json::Value::Null),
        _ => {
            // Other types (Time, Timestamp, Interval, List, etc.) are not
            // produced by the price table
            serde_json::Value::Null
        }
    }
}
