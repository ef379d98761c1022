//! SQLite connection provider
//!
//! Two sources:
//! - **shared**: one configured connection behind a mutex; a lookup holds the
//!   lock for its duration. Required for `:memory:` databases, which exist
//!   only inside their connection.
//! - **per-acquire**: every lookup opens (and on drop closes) its own
//!   connection to a database file.

use crate::config::{JournalMode, StoreConfig};
use crate::db;
use crate::errors::{decode_error, statement_error, Result};
use minorm_core::connection::{Connection, ConnectionProvider};
use minorm_core::errors::StoreError;
use minorm_core::value::{Row, SqlValue};
use rusqlite::types::{Value, ValueRef};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
enum Source {
    Shared(Mutex<rusqlite::Connection>),
    PerAcquire {
        path: PathBuf,
        foreign_keys: bool,
        journal_mode: JournalMode,
    },
}

/// `ConnectionProvider` backed by rusqlite
#[derive(Debug)]
pub struct SqliteProvider {
    source: Source,
}

impl SqliteProvider {
    /// Share an already opened connection between lookups
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self {
            source: Source::Shared(Mutex::new(conn)),
        }
    }

    /// A fresh, configured in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        db::configure(&conn, true, JournalMode::Memory)?;
        Ok(Self::from_connection(conn))
    }

    /// Build the provider a configuration asks for
    ///
    /// `:memory:` is always served from a shared connection.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        if config.shared || config.is_in_memory() {
            let conn = db::open_configured(config)?;
            tracing::debug!(database = %config.database, "opened shared sqlite connection");
            return Ok(Self::from_connection(conn));
        }

        Ok(Self {
            source: Source::PerAcquire {
                path: PathBuf::from(&config.database),
                foreign_keys: config.foreign_keys,
                journal_mode: config.journal_mode,
            },
        })
    }

    /// Whether lookups share one connection
    pub fn is_shared(&self) -> bool {
        matches!(self.source, Source::Shared(_))
    }

    /// Run a batch of statements, e.g. schema setup or seed data
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.with_connection(|conn| conn.execute_batch(sql))
    }

    /// Run `f` against a raw rusqlite connection from this provider
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<T>,
    {
        let conn = self.acquire()?;
        f(conn.raw()).map_err(|e| statement_error("execute", e))
    }
}

impl ConnectionProvider for SqliteProvider {
    type Connection<'a> = SqliteConnection<'a>;

    fn acquire(&self) -> Result<SqliteConnection<'_>> {
        match &self.source {
            Source::Shared(conn) => conn
                .lock()
                .map(SqliteConnection::Shared)
                .map_err(|_| StoreError::Acquire {
                    message: "shared connection is poisoned".to_string(),
                }),
            Source::PerAcquire {
                path,
                foreign_keys,
                journal_mode,
            } => {
                let conn = db::open(path)?;
                db::configure(&conn, *foreign_keys, *journal_mode)?;
                Ok(SqliteConnection::Owned(conn))
            }
        }
    }
}

/// A connection scoped to one lookup
///
/// Dropping it releases the shared lock or closes the owned connection.
pub enum SqliteConnection<'a> {
    Shared(MutexGuard<'a, rusqlite::Connection>),
    Owned(rusqlite::Connection),
}

impl SqliteConnection<'_> {
    pub fn raw(&self) -> &rusqlite::Connection {
        match self {
            SqliteConnection::Shared(guard) => &**guard,
            SqliteConnection::Owned(conn) => conn,
        }
    }
}

impl Connection for SqliteConnection<'_> {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        run_query(self.raw(), sql, params)
    }
}

fn run_query(conn: &rusqlite::Connection, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| statement_error("prepare", e))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let bound: Vec<Value> = params.iter().map(to_sqlite).collect();
    let mut rows = stmt
        .query(rusqlite::params_from_iter(bound.iter()))
        .map_err(|e| statement_error("query", e))?;

    let mut result = Vec::new();
    while let Some(row) = rows.next().map_err(|e| statement_error("step", e))? {
        let mut mapped = Row::new();
        for (index, column) in columns.iter().enumerate() {
            let value = row
                .get_ref(index)
                .map_err(|e| decode_error(column, e.to_string()))?;
            mapped.insert(column.as_str(), from_sqlite(column, value)?);
        }
        result.push(mapped);
    }

    Ok(result)
}

/// SQLite has no boolean or date storage class; store them as 0/1 and ISO text
fn to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(number) => Value::Integer(*number),
        SqlValue::Real(number) => Value::Real(*number),
        SqlValue::Text(text) => Value::Text(text.clone()),
        SqlValue::Bool(flag) => Value::Integer(i64::from(*flag)),
        SqlValue::Date(date) => Value::Text(date.format(DATE_FORMAT).to_string()),
        SqlValue::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

fn from_sqlite(column: &str, value: ValueRef<'_>) -> Result<SqlValue> {
    Ok(match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(number) => SqlValue::Integer(number),
        ValueRef::Real(number) => SqlValue::Real(number),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| SqlValue::Text(text.to_string()))
            .map_err(|e| decode_error(column, e.to_string()))?,
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
    })
}
