#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{widget_row, StubProvider, Widget};
use minorm_core::errors::{EntityMappingError, ValidationError};
use minorm_core::logging_facility::test_capture::init_test_capture;
use minorm_core::{log_op_end, log_op_error, log_op_start, EntityManager, StoreError};
use minorm_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

const FETCH_OP: &str = "fetch_by_id";

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, entity = "Widget");

    let starts = capture.find(op_name, EVENT_START);
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field("entity"), Some("Widget"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.find(op_name, EVENT_END);
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ValidationError::MissingTable {
        entity: "Widget".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let errors = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(errors.len(), 1, "Should have exactly one error event");
    assert_eq!(errors[0].field("err.code"), Some("ERR_VALIDATION"));
    assert_eq!(errors[0].field("err.kind"), Some("Validation"));
}

#[test]
fn test_fetch_found_logs_start_and_end() {
    let capture = init_test_capture();
    let id = 880_001;
    let manager = EntityManager::new(StubProvider::new().with_row(id, widget_row(id, "x", true)));

    manager.fetch_by_id::<Widget>(id).unwrap();

    assert_eq!(capture.find_for_id(FETCH_OP, EVENT_START, id).len(), 1);
    assert!(capture.find_for_id(FETCH_OP, EVENT_END_ERROR, id).is_empty());

    let ends = capture.find_for_id(FETCH_OP, EVENT_END, id);
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].field("found"), Some("true"));
    assert!(ends[0].field("duration_ms").is_some());
    assert_eq!(ends[0].component(), Some("minorm_core::manager"));
}

#[test]
fn test_fetch_absent_logs_found_false() {
    let capture = init_test_capture();
    let id = 880_002;
    let manager = EntityManager::new(StubProvider::new());

    assert!(manager.fetch_by_id::<Widget>(id).unwrap().is_none());

    let ends = capture.find_for_id(FETCH_OP, EVENT_END, id);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("found"), Some("false"));
}

#[test]
fn test_fetch_store_failure_logs_query_code() {
    let capture = init_test_capture();
    let id = 880_003;
    let manager = EntityManager::new(StubProvider::failing(StoreError::Acquire {
        message: "pool exhausted".to_string(),
    }));

    manager.fetch_by_id::<Widget>(id).unwrap_err();

    assert_eq!(capture.find_for_id(FETCH_OP, EVENT_START, id).len(), 1);
    assert!(capture.find_for_id(FETCH_OP, EVENT_END, id).is_empty());

    let failures = capture.find_for_id(FETCH_OP, EVENT_END_ERROR, id);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].field("err.code"), Some("ERR_QUERY"));
}

#[test]
fn test_fetch_mapping_failure_logs_mapping_code() {
    let capture = init_test_capture();
    let id = 880_004;
    let row = widget_row(id, "x", true).with("label", 7_i64);
    let manager = EntityManager::new(StubProvider::new().with_row(id, row));

    let err = manager.fetch_by_id::<Widget>(id).unwrap_err();
    assert!(matches!(
        err,
        minorm_core::OrmError::Mapping(EntityMappingError::TypeMismatch { .. })
    ));

    let failures = capture.find_for_id(FETCH_OP, EVENT_END_ERROR, id);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].field("err.code"), Some("ERR_ENTITY_MAPPING"));
}

#[test]
fn test_fetch_ambiguous_logs_ambiguous_code() {
    let capture = init_test_capture();
    let id = 880_005;
    let manager = EntityManager::new(
        StubProvider::new()
            .with_row(id, widget_row(id, "a", true))
            .with_row(id, widget_row(id, "b", false)),
    );

    manager.fetch_by_id::<Widget>(id).unwrap_err();

    let failures = capture.find_for_id(FETCH_OP, EVENT_END_ERROR, id);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].field("err.code"), Some("ERR_AMBIGUOUS_RESULT"));
}
