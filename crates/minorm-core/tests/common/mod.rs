//! Shared fixtures: entities and stub connection providers

#![allow(dead_code)]

use minorm_core::{
    Connection, ConnectionProvider, Entity, EntityDef, FieldDef, Row, SqlValue, StoreError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Widget {
    pub id: i64,
    pub label: String,
    pub active: bool,
}

impl Entity for Widget {
    fn describe() -> EntityDef<Self> {
        EntityDef::new()
            .table("widgets")
            .field(FieldDef::int64("id", |w: &mut Widget| &mut w.id).id())
            .field(FieldDef::text("label", |w: &mut Widget| &mut w.label))
            .field(FieldDef::boolean("active", |w: &mut Widget| &mut w.active).column("is_active"))
    }
}

pub fn widget_row(id: i64, label: &str, active: bool) -> Row {
    Row::new()
        .with("id", id)
        .with("label", label)
        .with("is_active", active)
}

/// Counters shared between a provider and the connections it hands out
#[derive(Debug, Default)]
pub struct Counters {
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
}

impl Counters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// In-memory provider answering select-by-id with canned rows per id
#[derive(Default)]
pub struct StubProvider {
    rows: HashMap<i64, Vec<Row>>,
    failure: Option<StoreError>,
    pub counters: Arc<Counters>,
    pub statements: Arc<Mutex<Vec<(String, Vec<SqlValue>)>>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, id: i64, row: Row) -> Self {
        self.rows.entry(id).or_default().push(row);
        self
    }

    pub fn failing(failure: StoreError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn last_statement(&self) -> Option<(String, Vec<SqlValue>)> {
        self.statements.lock().unwrap().last().cloned()
    }
}

pub struct StubConnection<'a> {
    provider: &'a StubProvider,
}

impl Connection for StubConnection<'_> {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        self.provider
            .statements
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));

        if let Some(failure) = &self.provider.failure {
            return Err(failure.clone());
        }

        let id = match params {
            [SqlValue::Integer(id)] => *id,
            other => panic!("expected a single integer parameter, got {other:?}"),
        };
        Ok(self.provider.rows.get(&id).cloned().unwrap_or_default())
    }
}

impl Drop for StubConnection<'_> {
    fn drop(&mut self) {
        self.provider.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl ConnectionProvider for StubProvider {
    type Connection<'a> = StubConnection<'a>;

    fn acquire(&self) -> Result<Self::Connection<'_>, StoreError> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(StubConnection { provider: self })
    }
}

/// Provider that fails the test if a connection is ever requested
pub struct ForbiddenProvider;

pub struct NeverConnection;

impl Connection for NeverConnection {
    fn query(&mut self, _sql: &str, _params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        panic!("no statement may run against the forbidden provider");
    }
}

impl ConnectionProvider for ForbiddenProvider {
    type Connection<'a> = NeverConnection;

    fn acquire(&self) -> Result<Self::Connection<'_>, StoreError> {
        panic!("a connection was acquired although validation should have failed first");
    }
}
