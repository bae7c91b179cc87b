//! Persistence gateway and schema tests on a real store.

mod support;

use common::{FaultCause, StoreError};
use domain::UserFields;
use user_service_lib::repository::{UserRepository, UserStore};

fn fields(name: &str, email: &str, age: i32) -> UserFields {
    UserFields::parse(name, email, age).unwrap()
}

#[tokio::test]
async fn test_create_and_read_back() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());

    let id = store
        .create(fields("Stepan", "stepan@example.com", 38))
        .await
        .unwrap();
    assert!(id > 0);

    let loaded = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Stepan");
    assert_eq!(loaded.email, "stepan@example.com");
    assert_eq!(loaded.age, 38);
}

#[tokio::test]
async fn test_find_missing_returns_none() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());

    assert!(store.find_by_id(999_999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_constraint_violation() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());

    store.create(fields("User1", "dup@example.com", 1)).await.unwrap();
    let err = store
        .create(fields("User2", "dup@example.com", 2))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::ConstraintViolation { .. }));
    assert!(err.to_string().contains("constraint"));
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_and_delete_missing_rows_fail_as_storage_faults() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());

    let update = store
        .update_by_id(12_345, fields("X", "x@example.com", 1))
        .await
        .unwrap_err();
    assert!(matches!(
        update,
        StoreError::StorageFault {
            cause: FaultCause::RowMissing(12_345),
            ..
        }
    ));

    let delete = store.delete_by_id(12_345).await.unwrap_err();
    assert!(delete.is_row_missing());
}

#[tokio::test]
async fn test_update_replaces_all_mutable_fields() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());

    let id = store.create(fields("Old", "old@example.com", 1)).await.unwrap();
    let before = store.find_by_id(id).await.unwrap().unwrap();

    store
        .update_by_id(id, fields("New", "new@example.com", 99))
        .await
        .unwrap();

    let after = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(after.fields(), fields("New", "new@example.com", 99));
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_delete_removes_row() {
    let db = support::test_database().await;
    let store = UserStore::new(db.get_connection());

    let id = store
        .create(fields("ToDelete", "delete@example.com", 5))
        .await
        .unwrap();
    store.delete_by_id(id).await.unwrap();

    assert!(store.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_migrations_applied_and_reversible() {
    let db = support::test_database().await;

    let status = db.migration_status().await.unwrap();
    assert!(!status.is_empty());
    assert!(status.iter().all(|(_, applied)| *applied));

    db.rollback_migration().await.unwrap();
    let status = db.migration_status().await.unwrap();
    assert!(status.iter().all(|(_, applied)| !*applied));

    db.run_migrations().await.unwrap();
    let store = UserStore::new(db.get_connection());
    assert!(store.find_all().await.unwrap().is_empty());
}
