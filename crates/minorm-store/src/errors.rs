//! Error handling for minorm-store
//!
//! Every failure surfaces as the core `StoreError`, so the entity manager can
//! wrap it without knowing about rusqlite.

use minorm_core::errors::StoreError;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Create a connection error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> StoreError {
    StoreError::Acquire {
        message: err.to_string(),
    }
}

/// Create a statement error from rusqlite::Error
pub fn statement_error(operation: &str, err: rusqlite::Error) -> StoreError {
    StoreError::Statement {
        op: operation.to_string(),
        message: err.to_string(),
    }
}

/// Create a column decoding error
pub fn decode_error(column: &str, reason: impl Into<String>) -> StoreError {
    StoreError::Decode {
        column: column.to_string(),
        message: reason.into(),
    }
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> StoreError {
    StoreError::Config {
        message: reason.into(),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> StoreError {
    StoreError::Io {
        op: operation.to_string(),
        message: err.to_string(),
    }
}
