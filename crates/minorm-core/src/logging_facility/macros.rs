//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use minorm_core::log_op_start;
/// log_op_start!("fetch_by_id");
/// log_op_start!("fetch_by_id", entity = "Widget", entity_id = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::minorm_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::minorm_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use minorm_core::log_op_end;
/// log_op_end!("fetch_by_id", duration_ms = 3);
/// log_op_end!("fetch_by_id", duration_ms = 3, found = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::minorm_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::minorm_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error must convert into `OrmError`; its kind and stable code are
/// recorded as `err.kind` / `err.code`.
///
/// # Example
///
/// ```
/// # use minorm_core::log_op_error;
/// # use minorm_core::errors::ValidationError;
/// let err = ValidationError::MissingId { entity: "Widget".to_string() };
/// log_op_error!("fetch_by_id", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let orm_err: $crate::errors::OrmError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::minorm_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?orm_err.kind(),
            err.code = orm_err.code(),
            error = %orm_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let orm_err: $crate::errors::OrmError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::minorm_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?orm_err.kind(),
            err.code = orm_err.code(),
            error = %orm_err,
            $($field)*
        );
    }};
}
