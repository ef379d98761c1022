//! minorm Store - SQLite connection provider and configuration
//!
//! Provides:
//! - `SqliteProvider`, a `ConnectionProvider` over `rusqlite`
//! - Database open/configure helpers
//! - `StoreConfig` loaded from TOML with environment overrides

pub mod config;
pub mod db;
pub mod errors;
pub mod provider;

// Re-export key types
pub use config::{JournalMode, StoreConfig};
pub use errors::Result;
pub use provider::{SqliteConnection, SqliteProvider};
