//! SQLite store for the unified price table.
//!
//! One flat table with columns `Date, Close, Volume, Stock, Return`.
//! Writes are **full replace**: any prior table of the same name is
//! dropped, schema and contents, before the new rows are inserted.
//! There is no schema versioning and no migration path; the next batch
//! run overwrites everything.

use crate::domain::{PriceRow, UnifiedTable};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

const DATE_FMT: &str = "%Y-%m-%d";

/// Errors from the store boundary. All fatal — no retry, no salvage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create database directory: {0}")]
    CreateDir(std::io::Error),

    #[error("malformed row in table '{table}': {reason}")]
    MalformedRow { table: String, reason: String },
}

/// Handle on one SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at the given path, creating the
    /// parent directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::CreateDir)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Persist the unified table under `table_name`, discarding any
    /// prior contents and schema of that table.
    pub fn replace_table(&mut self, table_name: &str, rows: &UnifiedTable) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS \"{table_name}\";
             CREATE TABLE \"{table_name}\" (
                 \"Date\"   TEXT    NOT NULL,
                 \"Close\"  REAL    NOT NULL,
                 \"Volume\" INTEGER NOT NULL,
                 \"Stock\"  TEXT    NOT NULL,
                 \"Return\" REAL
             );"
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO \"{table_name}\" (\"Date\", \"Close\", \"Volume\", \"Stock\", \"Return\")
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ))?;
            for row in rows {
                stmt.execute(params![
                    row.date.format(DATE_FMT).to_string(),
                    row.close,
                    row.volume as i64,
                    row.symbol,
                    row.ret,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Read the entire table back into memory, in insertion order.
    ///
    /// Fails if the table does not exist; there is no paging and no
    /// filtering pushed down to the store.
    pub fn load_table(&self, table_name: &str) -> Result<UnifiedTable, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT \"Date\", \"Close\", \"Volume\", \"Stock\", \"Return\"
             FROM \"{table_name}\" ORDER BY rowid"
        ))?;

        let mapped = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, f64>(1)?,
                r.get::<_, i64>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, Option<f64>>(4)?,
            ))
        })?;

        let mut rows = UnifiedTable::new();
        for record in mapped {
            let (date_str, close, volume, symbol, ret) = record?;
            let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|e| {
                StoreError::MalformedRow {
                    table: table_name.to_string(),
                    reason: format!("bad date '{date_str}': {e}"),
                }
            })?;
            rows.push(PriceRow {
                date,
                close,
                volume: volume as u64,
                symbol,
                ret,
            });
        }

        Ok(rows)
    }
}
