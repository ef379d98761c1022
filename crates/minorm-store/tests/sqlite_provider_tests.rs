#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{ada, seed, seeded_in_memory, Member, MemberWithNickname, Person, Tier};
use minorm_core::errors::{EntityMappingError, OrmError, OrmErrorKind, QueryError, StoreError};
use minorm_core::EntityManager;
use minorm_store::{JournalMode, SqliteProvider, StoreConfig};

#[test]
fn test_fetch_existing_row() {
    let manager = EntityManager::new(seeded_in_memory());

    let member = manager.fetch_by_id::<Member>(1).unwrap();

    assert_eq!(member, Some(ada()));
}

#[test]
fn test_fetch_missing_row_is_none() {
    let manager = EntityManager::new(seeded_in_memory());

    assert_eq!(manager.fetch_by_id::<Member>(999).unwrap(), None);
}

#[test]
fn test_integer_flag_is_false_when_zero() {
    let manager = EntityManager::new(seeded_in_memory());

    let grace = manager.fetch_by_id::<Member>(2).unwrap().unwrap();

    assert!(!grace.active);
    assert_eq!(grace.tier, Tier::Silver);
}

#[test]
fn test_null_integer_is_mapping_error() {
    let manager = EntityManager::new(seeded_in_memory());

    let err = manager.fetch_by_id::<Member>(3).unwrap_err();

    match err {
        OrmError::Mapping(EntityMappingError::UnexpectedNull { field, column, .. }) => {
            assert_eq!(field, "age");
            assert_eq!(column, "age");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_null_columns_fill_optional_fields() {
    let provider = SqliteProvider::open_in_memory().unwrap();
    provider
        .execute_batch(
            "create table people (id integer primary key, nick text, score integer);
             insert into people values (1, null, 5);
             insert into people values (2, 'ace', null);",
        )
        .unwrap();
    let manager = EntityManager::new(provider);

    let first = manager.fetch_by_id::<Person>(1).unwrap().unwrap();
    let second = manager.fetch_by_id::<Person>(2).unwrap().unwrap();

    assert_eq!(first, Person { id: 1, nick: None, score: Some(5) });
    assert_eq!(second, Person { id: 2, nick: Some("ace".to_string()), score: None });
}

#[test]
fn test_unparsable_date_text_is_mapping_error() {
    let manager = EntityManager::new(seeded_in_memory());

    let err = manager.fetch_by_id::<Member>(4).unwrap_err();

    assert!(matches!(
        err,
        OrmError::Mapping(EntityMappingError::InvalidDate { ref value, .. }) if value == "yesterday"
    ));
}

#[test]
fn test_lowercase_enum_text_is_mapping_error() {
    let manager = EntityManager::new(seeded_in_memory());

    let err = manager.fetch_by_id::<Member>(5).unwrap_err();

    assert_eq!(err.kind(), OrmErrorKind::EntityMapping);
    assert!(err.to_string().contains("tier"));
}

#[test]
fn test_unknown_column_is_query_error() {
    let manager = EntityManager::new(seeded_in_memory());

    let err = manager.fetch_by_id::<MemberWithNickname>(1).unwrap_err();

    match err {
        OrmError::Query(QueryError::Execution { id, source, .. }) => {
            assert_eq!(id, 1);
            assert!(matches!(source, StoreError::Statement { ref op, .. } if op == "prepare"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_table_is_query_error() {
    let manager = EntityManager::new(SqliteProvider::open_in_memory().unwrap());

    let err = manager.fetch_by_id::<Member>(1).unwrap_err();

    assert_eq!(err.kind(), OrmErrorKind::Query);
    assert!(err.to_string().contains("members"));
}

#[test]
fn test_duplicate_ids_are_ambiguous() {
    let provider = SqliteProvider::open_in_memory().unwrap();
    provider
        .execute_batch(
            "create table members (member_id integer, name text, age integer, joined text, active integer, tier text);
             insert into members values (7, 'a', 1, '2020-01-01', 1, 'GOLD');
             insert into members values (7, 'b', 2, '2020-01-02', 0, 'GOLD');",
        )
        .unwrap();
    let manager = EntityManager::new(provider);

    let err = manager.fetch_by_id::<Member>(7).unwrap_err();

    assert!(matches!(
        err,
        OrmError::Query(QueryError::AmbiguousResult { rows: 2, .. })
    ));
}

#[test]
fn test_shared_connection_is_reusable_after_failure() {
    let manager = EntityManager::new(seeded_in_memory());

    manager.fetch_by_id::<MemberWithNickname>(1).unwrap_err();
    manager.fetch_by_id::<Member>(3).unwrap_err();

    assert_eq!(manager.fetch_by_id::<Member>(1).unwrap(), Some(ada()));
}

#[test]
fn test_per_acquire_provider_on_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.db");
    let config = StoreConfig {
        database: path.to_string_lossy().into_owned(),
        shared: false,
        journal_mode: JournalMode::Delete,
        ..StoreConfig::default()
    };

    let provider = SqliteProvider::from_config(&config).unwrap();
    assert!(!provider.is_shared());
    seed(&provider);

    let manager = EntityManager::new(provider);
    assert_eq!(manager.fetch_by_id::<Member>(1).unwrap(), Some(ada()));
    assert!(path.exists());
}

#[test]
fn test_shared_provider_on_file_sees_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.db");
    let config = StoreConfig {
        database: path.to_string_lossy().into_owned(),
        ..StoreConfig::default()
    };
    seed(&SqliteProvider::from_config(&config).unwrap());

    let manager = EntityManager::new(SqliteProvider::from_config(&config).unwrap());

    let grace = manager.fetch_by_id::<Member>(2).unwrap().unwrap();
    assert_eq!(grace.name, "Grace");
}

#[test]
fn test_in_memory_config_is_always_shared() {
    let config = StoreConfig {
        shared: false,
        ..StoreConfig::default()
    };

    let provider = SqliteProvider::from_config(&config).unwrap();

    assert!(provider.is_shared());
}
