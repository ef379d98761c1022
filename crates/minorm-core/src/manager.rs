//! Entity manager facade
//!
//! `EntityManager::fetch_by_id` ties the pieces together:
//!
//! 1. resolve the descriptor (no I/O; validation errors surface here)
//! 2. acquire a scoped connection from the provider
//! 3. run the select-by-id statement with the id bound
//! 4. zero rows → `Ok(None)`, one row → hydrate, more → ambiguity error
//!
//! ## Logging Ownership
//!
//! The facade owns lifecycle logging for lookups (`log_op_start!`,
//! `log_op_end!`, `log_op_error!`). Resolver and hydrator only emit
//! `tracing::debug!`.

use crate::connection::{Connection, ConnectionProvider};
use crate::entity::Entity;
use crate::errors::{OrmError, QueryError, Result, StoreError};
use crate::hydration;
use crate::metadata::{self, EntityDescriptor};
use crate::sql::{self, PlaceholderStyle};
use crate::value::SqlValue;
use crate::{log_op_end, log_op_error, log_op_start};
use std::sync::Arc;

const OP_FETCH_BY_ID: &str = "fetch_by_id";

/// Loads entities by primary key through an external connection provider
#[derive(Debug, Clone)]
pub struct EntityManager<P> {
    provider: P,
    placeholder_style: PlaceholderStyle,
}

impl<P: ConnectionProvider> EntityManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            placeholder_style: PlaceholderStyle::default(),
        }
    }

    /// Use a different positional placeholder syntax in generated SQL
    pub fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder_style = style;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve (or fetch from the registry) the descriptor for `T`
    ///
    /// Useful to validate entity types at startup, before the first lookup.
    pub fn describe<T: Entity>(&self) -> Result<Arc<EntityDescriptor<T>>> {
        Ok(metadata::resolve::<T>()?)
    }

    /// The statement `fetch_by_id::<T>` would run
    pub fn select_sql<T: Entity>(&self) -> Result<String> {
        let descriptor = metadata::resolve::<T>()?;
        Ok(sql::build(&*descriptor, self.placeholder_style).sql)
    }

    /// Load the entity of type `T` whose id column equals `id`
    ///
    /// ## Returns
    ///
    /// `Ok(None)` when no row matches; a missing row is not an error.
    ///
    /// ## Errors
    ///
    /// - `Validation`: `T` is not a valid entity (raised before any connection is acquired)
    /// - `Query`: the provider failed, or more than one row matched
    /// - `Mapping`: the row could not be converted into `T`
    pub fn fetch_by_id<T: Entity>(&self, id: i64) -> Result<Option<T>> {
        let entity = std::any::type_name::<T>();
        log_op_start!(OP_FETCH_BY_ID, entity = entity, entity_id = id);
        let start = std::time::Instant::now();

        let result = self.fetch_by_id_impl::<T>(id).map_err(|e: OrmError| {
            log_op_error!(
                OP_FETCH_BY_ID,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                entity = entity,
                entity_id = id
            );
            e
        })?;

        log_op_end!(
            OP_FETCH_BY_ID,
            duration_ms = start.elapsed().as_millis() as u64,
            entity = entity,
            entity_id = id,
            found = result.is_some()
        );

        Ok(result)
    }

    fn fetch_by_id_impl<T: Entity>(&self, id: i64) -> Result<Option<T>> {
        let descriptor = metadata::resolve::<T>()?;
        let select = sql::build(&*descriptor, self.placeholder_style);

        let wrap = |source: StoreError| QueryError::Execution {
            entity: descriptor.type_name().to_string(),
            id,
            source,
        };

        let mut conn = self.provider.acquire().map_err(wrap)?;
        tracing::debug!(sql = %select.sql, id, "executing select by id");
        let mut rows = conn
            .query(&select.sql, &[SqlValue::Integer(id)])
            .map_err(wrap)?;
        drop(conn);

        match rows.len() {
            0 => Ok(None),
            1 => {
                let row = rows.swap_remove(0);
                Ok(Some(hydration::hydrate(&*descriptor, &row)?))
            }
            n => Err(QueryError::AmbiguousResult {
                entity: descriptor.type_name().to_string(),
                id,
                rows: n,
            }
            .into()),
        }
    }
}
