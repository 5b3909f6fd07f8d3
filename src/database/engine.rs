//! DuckDB-based deferred query engine
//!
//! Each round trip is a plain SQL statement run on a blocking thread:
//! `COUNT(*)` over the query for the total, `LIMIT`/`OFFSET` over it for a
//! page. Rows come back as JSON objects keyed by column name.

use crate::error::{Error, Result};
use crate::query::QuerySource;
use async_trait::async_trait;
use duckdb::types::Value as DbValue;
use duckdb::Connection;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Location string that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

type SharedConnection = Arc<Mutex<Connection>>;

// ============================================================================
// Database Engine
// ============================================================================

/// Owner of a DuckDB connection that hands out deferred queries
pub struct DatabaseEngine {
    /// DuckDB connection, shared with every query created from this engine
    conn: SharedConnection,
    /// Database file path, or `:memory:`
    location: String,
}

impl DatabaseEngine {
    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: IN_MEMORY.to_string(),
        })
    }

    /// Open a database file, or an in-memory database for `:memory:`
    pub fn open(location: &str) -> Result<Self> {
        if location == IN_MEMORY {
            return Self::open_in_memory();
        }

        let conn = Connection::open(location).map_err(|e| {
            Error::config(format!("Failed to open DuckDB database '{location}': {e}"))
        })?;

        tracing::debug!(location, "Opened DuckDB database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: location.to_string(),
        })
    }

    /// Run one or more statements, typically schema setup
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = lock(&self.conn)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Create an unexecuted query over `sql`.
    ///
    /// The statement should carry its own `ORDER BY`; pages are only stable
    /// over a stable order.
    pub fn query(&self, sql: impl Into<String>) -> DatabaseQuery {
        DatabaseQuery {
            conn: Arc::clone(&self.conn),
            sql: normalize_sql(&sql.into()),
            offset: 0,
            limit: None,
        }
    }

    /// Database file path, or `:memory:`
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Debug for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseEngine")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Database Query
// ============================================================================

/// A lazy SQL query; composing skip/take only rewrites the statement
#[derive(Clone)]
pub struct DatabaseQuery {
    conn: SharedConnection,
    sql: String,
    offset: usize,
    limit: Option<usize>,
}

impl DatabaseQuery {
    /// The statement as it would be executed, with any window applied
    pub fn sql(&self) -> String {
        match (self.limit, self.offset) {
            (None, 0) => self.sql.clone(),
            (None, offset) => format!("SELECT * FROM ({}) AS q OFFSET {offset}", self.sql),
            (Some(limit), offset) => format!(
                "SELECT * FROM ({}) AS q LIMIT {limit} OFFSET {offset}",
                self.sql
            ),
        }
    }

    fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM ({}) AS q", self.sql())
    }
}

impl fmt::Debug for DatabaseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseQuery")
            .field("sql", &self.sql)
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QuerySource for DatabaseQuery {
    type Item = Value;

    async fn count(&self) -> Result<usize> {
        let conn = Arc::clone(&self.conn);
        let sql = self.count_sql();
        tracing::debug!(sql = %sql, "Executing count query");

        let count = run_blocking(move || {
            let conn = lock(&conn)?;
            let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(count)
        })
        .await?;

        usize::try_from(count).map_err(|_| Error::query(format!("Invalid row count: {count}")))
    }

    fn skip(mut self, n: usize) -> Self {
        self.offset = self.offset.saturating_add(n);
        self.limit = self.limit.map(|limit| limit.saturating_sub(n));
        self
    }

    fn take(mut self, n: usize) -> Self {
        self.limit = Some(self.limit.map_or(n, |limit| limit.min(n)));
        self
    }

    async fn fetch(self) -> Result<Vec<Value>> {
        let sql = self.sql();
        tracing::debug!(sql = %sql, "Executing range query");

        let conn = self.conn;
        run_blocking(move || {
            let conn = lock(&conn)?;
            fetch_records(&conn, &sql)
        })
        .await
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn lock(conn: &SharedConnection) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| Error::query("DuckDB connection lock poisoned"))
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::query(format!("Database task failed: {e}")))?
}

/// Trim whitespace and trailing semicolons so the statement nests as a
/// subquery
fn normalize_sql(sql: &str) -> String {
    sql.trim().trim_end_matches(';').trim_end().to_string()
}

fn fetch_records(conn: &Connection, sql: &str) -> Result<Vec<Value>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let columns = rows.as_ref().map(|stmt| stmt.column_names()).unwrap_or_default();

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Map::with_capacity(columns.len());
        for (index, name) in columns.iter().enumerate() {
            let value: DbValue = row.get(index)?;
            record.insert(name.clone(), duckdb_value_to_json(value));
        }
        records.push(Value::Object(record));
    }

    Ok(records)
}

/// Convert DuckDB Value to JSON Value
fn duckdb_value_to_json(value: DbValue) -> Value {
    match value {
        DbValue::Null => Value::Null,
        DbValue::Boolean(b) => Value::Bool(b),
        DbValue::TinyInt(i) => Value::Number(i.into()),
        DbValue::SmallInt(i) => Value::Number(i.into()),
        DbValue::Int(i) => Value::Number(i.into()),
        DbValue::BigInt(i) => Value::Number(i.into()),
        DbValue::HugeInt(i) => Value::String(i.to_string()),
        DbValue::UTinyInt(i) => Value::Number(i.into()),
        DbValue::USmallInt(i) => Value::Number(i.into()),
        DbValue::UInt(i) => Value::Number(i.into()),
        DbValue::UBigInt(i) => Value::Number(i.into()),
        DbValue::Float(f) => {
            serde_json::Number::from_f64(f64::from(f)).map_or(Value::Null, Value::Number)
        }
        DbValue::Double(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        DbValue::Text(s) => Value::String(s),
        DbValue::Blob(b) => Value::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
        DbValue::Timestamp(unit, i) => {
            let micros = unit.to_micros(i);
            let secs = micros.div_euclid(1_000_000);
            let nsecs = (micros.rem_euclid(1_000_000) * 1000) as u32;
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()))
                .unwrap_or(Value::Number(i.into()))
        }
        DbValue::Date32(d) => {
            // Days since epoch (719163 is the number of days from 1 CE to 1970-01-01)
            chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Number(d.into()))
        }
        DbValue::Time64(unit, t) => {
            // Microseconds since midnight
            let micros = unit.to_micros(t);
            let secs = micros / 1_000_000;
            Value::String(format!(
                "{:02}:{:02}:{:02}.{:06}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                micros % 1_000_000
            ))
        }
        _ => Value::String(format!("{value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PagedListMetadata;
    use crate::query::{query_to_page, to_bounded_query};
    use crate::slicing::PageRequest;
    use crate::types::TotalCount;
    use pretty_assertions::assert_eq;
    use duckdb::types::TimeUnit;
    use serde_json::json;
    use test_case::test_case;

    fn numbers_engine(rows: usize) -> DatabaseEngine {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        engine
            .execute_batch(&format!(
                "CREATE TABLE numbers AS SELECT range::INTEGER AS n FROM range(1, {});",
                rows + 1
            ))
            .unwrap();
        engine
    }

    #[test]
    fn test_window_sql() {
        let engine = numbers_engine(0);
        let query = engine.query("SELECT n FROM numbers ORDER BY n;  ");

        assert_eq!(query.sql(), "SELECT n FROM numbers ORDER BY n");
        assert_eq!(
            query.clone().skip(20).take(10).sql(),
            "SELECT * FROM (SELECT n FROM numbers ORDER BY n) AS q LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            query.skip(5).sql(),
            "SELECT * FROM (SELECT n FROM numbers ORDER BY n) AS q OFFSET 5"
        );
    }

    #[tokio::test]
    async fn test_count_and_fetch() {
        let engine = numbers_engine(25);
        let query = engine.query("SELECT n FROM numbers ORDER BY n");

        assert_eq!(query.count().await.unwrap(), 25);
        assert_eq!(query.clone().skip(20).count().await.unwrap(), 5);

        let rows = query.skip(3).take(2).fetch().await.unwrap();
        assert_eq!(rows, vec![json!({"n": 4}), json!({"n": 5})]);
    }

    #[tokio::test]
    async fn test_query_to_page_over_duckdb() {
        let engine = numbers_engine(100);
        let query = engine.query("SELECT n FROM numbers ORDER BY n");

        let page = query_to_page(query, PageRequest::new(11, 10)).await.unwrap();

        assert_eq!(page.page_number().unwrap(), 10);
        assert_eq!(page.items().first(), Some(&json!({"n": 91})));
        assert_eq!(page.items().last(), Some(&json!({"n": 100})));
    }

    #[tokio::test]
    async fn test_empty_table_is_sentinel() {
        let engine = numbers_engine(0);
        let query = engine.query("SELECT n FROM numbers");

        let page = query_to_page(query, PageRequest::new(1, 10)).await.unwrap();
        assert!(page.is_empty_set());
    }

    #[tokio::test]
    async fn test_bounded_query_stays_unexecuted() {
        let engine = numbers_engine(30);
        let query = engine.query("SELECT n FROM numbers ORDER BY n");

        let bounded = to_bounded_query(query, 4, 10, TotalCount::Known(30), true)
            .await
            .unwrap();

        assert_eq!(bounded.page_number, 3);
        assert_eq!(
            bounded.query.sql(),
            "SELECT * FROM (SELECT n FROM numbers ORDER BY n) AS q LIMIT 10 OFFSET 20"
        );
    }

    #[tokio::test]
    async fn test_invalid_sql_is_a_database_error() {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        let err = engine.query("SELECT * FROM missing").count().await.unwrap_err();

        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_duckdb_value_to_json() {
        assert_eq!(duckdb_value_to_json(DbValue::Null), Value::Null);
        assert_eq!(duckdb_value_to_json(DbValue::Boolean(true)), Value::Bool(true));
        assert_eq!(duckdb_value_to_json(DbValue::Int(42)), json!(42));
        assert_eq!(
            duckdb_value_to_json(DbValue::Text("hello".to_string())),
            json!("hello")
        );
        assert_eq!(duckdb_value_to_json(DbValue::Date32(0)), json!("1970-01-01"));
    }

    #[test_case(TimeUnit::Second, 86_400 ; "seconds")]
    #[test_case(TimeUnit::Millisecond, 86_400_000 ; "milliseconds")]
    #[test_case(TimeUnit::Microsecond, 86_400_000_000 ; "microseconds")]
    #[test_case(TimeUnit::Nanosecond, 86_400_000_000_000 ; "nanoseconds")]
    fn test_timestamp_respects_unit(unit: TimeUnit, value: i64) {
        assert_eq!(
            duckdb_value_to_json(DbValue::Timestamp(unit, value)),
            json!("1970-01-02T00:00:00.000000Z")
        );
    }

    #[test]
    fn test_time_to_json() {
        let micros = (13 * 3600 + 5 * 60 + 9) * 1_000_000 + 250_000;
        assert_eq!(
            duckdb_value_to_json(DbValue::Time64(TimeUnit::Microsecond, micros)),
            json!("13:05:09.250000")
        );
    }

    #[tokio::test]
    async fn test_temporal_columns_over_duckdb() {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        let rows = engine
            .query(
                "SELECT TIMESTAMP_S '2024-03-01 12:30:00' AS s,
                        TIMESTAMP_MS '2024-03-01 12:30:00' AS ms,
                        TIMESTAMP_NS '2024-03-01 12:30:00' AS ns,
                        TIME '08:15:30' AS t",
            )
            .fetch()
            .await
            .unwrap();

        let expected = json!("2024-03-01T12:30:00.000000Z");
        assert_eq!(rows[0]["s"], expected);
        assert_eq!(rows[0]["ms"], expected);
        assert_eq!(rows[0]["ns"], expected);
        assert_eq!(rows[0]["t"], json!("08:15:30.000000"));
    }
}
