//! Metadata resolution and the descriptor registry
//!
//! `resolve::<T>()` validates `T::describe()` once and caches the resulting
//! [`EntityDescriptor`] for the lifetime of the process. Entries are never
//! evicted or replaced.
//!
//! Concurrent first-time resolution of the same type is allowed: each caller
//! may build its own descriptor outside the lock, and the first one inserted
//! wins. Builds are deterministic, so the losers' descriptors are
//! structurally equal to the winner and are simply dropped.

use crate::entity::{Entity, EntityDef, FieldAccessor, FieldKind};
use crate::errors::ValidationError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type Registry = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// One resolved column of an entity
#[derive(Debug)]
pub struct ColumnMapping<T> {
    column: String,
    field: &'static str,
    accessor: FieldAccessor<T>,
}

impl<T> ColumnMapping<T> {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn kind(&self) -> FieldKind {
        self.accessor.kind()
    }

    pub fn accessor(&self) -> &FieldAccessor<T> {
        &self.accessor
    }
}

/// Validated, immutable metadata for one entity type
#[derive(Debug)]
pub struct EntityDescriptor<T> {
    type_name: &'static str,
    table_name: String,
    id_column: String,
    columns: Vec<ColumnMapping<T>>,
}

impl<T: Entity> EntityDescriptor<T> {
    /// Validate a description, failing on the first violated rule
    pub fn from_def(def: EntityDef<T>) -> Result<Self, ValidationError> {
        let type_name = std::any::type_name::<T>();
        let entity = || type_name.to_string();

        if !def.entity {
            return Err(ValidationError::NotAnEntity { entity: entity() });
        }

        let table_name = match def.table {
            None => return Err(ValidationError::MissingTable { entity: entity() }),
            Some(name) if name.is_empty() => {
                return Err(ValidationError::EmptyTableName { entity: entity() })
            }
            Some(name) => name,
        };

        let id_fields: Vec<_> = def.fields.iter().filter(|f| f.id).collect();
        let id_field = match id_fields.as_slice() {
            [] => return Err(ValidationError::MissingId { entity: entity() }),
            [single] => *single,
            many => {
                return Err(ValidationError::MultipleIds {
                    entity: entity(),
                    fields: many.iter().map(|f| f.name.to_string()).collect(),
                })
            }
        };

        if id_field.accessor.is_nullable() {
            return Err(ValidationError::InvalidIdKind {
                entity: entity(),
                field: id_field.name.to_string(),
                kind: format!("optional {}", id_field.kind()),
            });
        }

        if id_field.kind() != FieldKind::Int64 {
            return Err(ValidationError::InvalidIdKind {
                entity: entity(),
                field: id_field.name.to_string(),
                kind: id_field.kind().to_string(),
            });
        }

        if matches!(id_field.column.as_deref(), Some("")) {
            return Err(ValidationError::EmptyColumnName {
                entity: entity(),
                field: id_field.name.to_string(),
            });
        }

        let id_field_name = id_field.name;
        let mut id_column = None;
        let mut columns: Vec<ColumnMapping<T>> = Vec::with_capacity(def.fields.len());

        for field in def.fields {
            let column = match field.column {
                Some(name) if !name.is_empty() => name,
                _ => field.name.to_string(),
            };

            if let Some(existing) = columns.iter().find(|c| c.column == column) {
                return Err(ValidationError::DuplicateColumn {
                    entity: entity(),
                    column,
                    first: existing.field.to_string(),
                    second: field.name.to_string(),
                });
            }

            if field.id {
                id_column = Some(column.clone());
            }

            columns.push(ColumnMapping {
                column,
                field: field.name,
                accessor: field.accessor,
            });
        }

        // The id field was found above, so its column is always recorded.
        let id_column = id_column.unwrap_or_else(|| id_field_name.to_string());

        tracing::debug!(
            entity = type_name,
            table = %table_name,
            id_column = %id_column,
            columns = columns.len(),
            "resolved entity descriptor"
        );

        Ok(Self {
            type_name,
            table_name,
            id_column,
            columns,
        })
    }
}

impl<T> EntityDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Columns in field declaration order
    pub fn columns(&self) -> &[ColumnMapping<T>] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMapping<T>> {
        self.columns.iter().find(|c| c.column == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.column.as_str())
    }
}

/// Get the descriptor for `T`, resolving and caching it on first use
///
/// Validation failures are not cached; every call for an invalid type
/// re-runs validation and fails the same way.
pub fn resolve<T: Entity>() -> Result<Arc<EntityDescriptor<T>>, ValidationError> {
    let key = TypeId::of::<T>();

    let cached = registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned();
    if let Some(found) = cached.and_then(|entry| entry.downcast::<EntityDescriptor<T>>().ok()) {
        return Ok(found);
    }

    let built = Arc::new(EntityDescriptor::from_def(T::describe())?);

    let entry = registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
        .clone();

    Ok(entry.downcast::<EntityDescriptor<T>>().unwrap_or(built))
}

/// Number of descriptors resolved so far in this process
pub fn registry_len() -> usize {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .len()
}

/// Whether `T` already has a cached descriptor
pub fn is_resolved<T: Entity>() -> bool {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&TypeId::of::<T>())
}
