//! Unit of Work: one transaction per gateway call.
//!
//! `run` begins a transaction, hands the borrowed transaction to the
//! operation, then commits on success or rolls back on error. A failed
//! rollback is logged and the operation's own error is returned. If the
//! future is dropped before commit (panic, cancellation), the
//! transaction's `Drop` rolls it back.

use std::future::Future;
use std::pin::Pin;

use common::{StoreError, StoreResult};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

/// Boxed future returned by a unit-of-work operation.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Opens one transaction per call on a shared connection pool.
#[derive(Clone)]
pub struct UnitOfWork {
    db: DatabaseConnection,
}

impl UnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Execute `f` inside a fresh transaction.
    ///
    /// `operation` names the unit of work in logs and in begin/commit
    /// failures. The store's default isolation level applies.
    pub async fn run<F, T>(&self, operation: &str, f: F) -> StoreResult<T>
    where
        F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| StoreError::fault(format!("{}: cannot begin transaction", operation), e))?;
        tracing::debug!(operation, "transaction started");

        let outcome = f(&txn).await;

        match outcome {
            Ok(result) => {
                txn.commit()
                    .await
                    .map_err(|e| StoreError::from_db(format!("{}: commit failed", operation), e))?;
                tracing::debug!(operation, "transaction committed");
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(operation, "Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Run a unit of work with a closure body, e.g.
/// `with_transaction!(uow, "op", |txn| { ... })`.
macro_rules! with_transaction {
    ($uow:expr, $op:expr, |$txn:ident| $body:expr) => {
        $uow.run($op, move |$txn| {
            Box::pin(async move {
                let result: common::StoreResult<_> = $body;
                result
            })
        })
        .await
    };
}

pub(crate) use with_transaction;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::FaultCause;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    use crate::infra::Database;
    use crate::repository::entities::user::{ActiveModel, Entity as UserEntity};

    async fn insert(txn: &DatabaseTransaction, email: &str) -> StoreResult<i64> {
        let model = ActiveModel {
            name: Set("Ann".to_string()),
            email: Set(email.to_string()),
            age: Set(30),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| StoreError::from_db("Cannot insert", e))?;
        Ok(model.id)
    }

    async fn emails(db: &Database) -> Vec<String> {
        UserEntity::find()
            .all(&db.get_connection())
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.email)
            .collect()
    }

    #[tokio::test]
    async fn test_ok_commits() {
        let db = Database::in_memory().await;
        let uow = UnitOfWork::new(db.get_connection());

        let id = with_transaction!(uow, "insert", |txn| {
            insert(txn, "ann@ex.com").await
        })
        .unwrap();

        let stored = UserEntity::find_by_id(id)
            .one(&db.get_connection())
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_error_after_insert_rolls_back_and_is_returned_unchanged() {
        let db = Database::in_memory().await;
        let uow = UnitOfWork::new(db.get_connection());

        let result: StoreResult<()> = with_transaction!(uow, "insert then fail", |txn| {
            insert(txn, "ann@ex.com").await?;
            Err(StoreError::row_missing("Cannot finish", 42))
        });

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Cannot finish");
        assert!(matches!(
            err,
            StoreError::StorageFault {
                cause: FaultCause::RowMissing(42),
                ..
            }
        ));
        assert!(emails(&db).await.is_empty());
    }

    #[tokio::test]
    async fn test_constraint_violation_discards_earlier_statements() {
        let db = Database::in_memory().await;
        let uow = UnitOfWork::new(db.get_connection());
        with_transaction!(uow, "seed", |txn| insert(txn, "taken@ex.com").await).unwrap();

        let err = with_transaction!(uow, "two inserts", |txn| {
            insert(txn, "fresh@ex.com").await?;
            insert(txn, "taken@ex.com").await
        })
        .unwrap_err();

        assert!(err.is_constraint_violation());
        assert_eq!(emails(&db).await, vec!["taken@ex.com".to_string()]);
    }
}
