//! minorm Core - single-row entity mapper
//!
//! This crate provides the generic machinery for loading one row of a table
//! into a plain Rust struct by primary key:
//! - Declarative entity descriptions (`Entity`, `EntityDef`, `FieldDef`)
//! - Metadata resolution with a process-wide descriptor registry
//! - Parameterized select-by-id statement synthesis
//! - Row hydration with a fixed coercion policy
//! - The `EntityManager` facade over an external `ConnectionProvider`
//!
//! Connections, pooling and drivers live outside this crate; see `minorm-store`
//! for the SQLite provider.

pub mod connection;
pub mod entity;
pub mod errors;
pub mod hydration;
pub mod logging_facility;
pub mod manager;
pub mod metadata;
pub mod sql;
pub mod value;

#[doc(hidden)]
pub use minorm_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use connection::{Connection, ConnectionProvider};
pub use entity::{Entity, EntityDef, EntityEnum, FieldDef, FieldKind};
pub use errors::{EntityMappingError, OrmError, OrmErrorKind, QueryError, StoreError, ValidationError};
pub use manager::EntityManager;
pub use metadata::{resolve, EntityDescriptor};
pub use sql::{PlaceholderStyle, SelectById};
pub use value::{Row, SqlValue};
