//! Connection-provider boundary
//!
//! The entity manager never opens, pools, or configures connections itself.
//! It asks a [`ConnectionProvider`] for a scoped connection per lookup and
//! drops it before returning, whatever the outcome. Releasing the connection
//! is the guard's `Drop`.

use crate::errors::StoreError;
use crate::value::{Row, SqlValue};

/// A connection exclusively owned by one lookup for its duration
pub trait Connection {
    /// Run `sql` with positional `params` and return every result row
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError>;
}

/// Source of scoped connections
pub trait ConnectionProvider {
    type Connection<'a>: Connection
    where
        Self: 'a;

    fn acquire(&self) -> Result<Self::Connection<'_>, StoreError>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StoreError> {
        (**self).query(sql, params)
    }
}
