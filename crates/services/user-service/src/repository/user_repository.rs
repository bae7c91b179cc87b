//! User repository: the persistence gateway.
//!
//! Every method is one unit of work. It either commits its whole effect
//! or rolls back and returns a [`StoreError`]; absence on read is
//! `Ok(None)`, never an error.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::infra::unit_of_work::with_transaction;
use crate::infra::UnitOfWork;
use common::{StoreError, StoreResult};
use domain::{User, UserFields};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the identifier assigned by the store
    async fn create(&self, user: UserFields) -> StoreResult<i64>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// List all users in store order
    async fn find_all(&self) -> StoreResult<Vec<User>>;

    /// Replace name, email and age of an existing user
    async fn update_by_id(&self, id: i64, fields: UserFields) -> StoreResult<()>;

    /// Remove an existing user
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    uow: UnitOfWork,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            uow: UnitOfWork::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: UserFields) -> StoreResult<i64> {
        let id = with_transaction!(self.uow, "create user", |txn| {
            let (name, email, age) = user.into_parts();
            let active_model = ActiveModel {
                name: Set(name),
                email: Set(email),
                age: Set(age),
                created_at: Set(Utc::now()),
                ..Default::default()
            };

            let model = active_model
                .insert(txn)
                .await
                .map_err(|e| StoreError::from_db("Cannot create user", e))?;
            Ok(model.id)
        })?;

        tracing::info!("User created with id={}", id);
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        with_transaction!(self.uow, "find user", |txn| {
            let result = UserEntity::find_by_id(id)
                .one(txn)
                .await
                .map_err(|e| StoreError::fault(format!("Cannot find user by id={}", id), e))?;

            Ok(result.map(User::from))
        })
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        with_transaction!(self.uow, "list users", |txn| {
            let models = UserEntity::find()
                .all(txn)
                .await
                .map_err(|e| StoreError::fault("Cannot load users list", e))?;

            Ok(models.into_iter().map(User::from).collect())
        })
    }

    async fn update_by_id(&self, id: i64, fields: UserFields) -> StoreResult<()> {
        with_transaction!(self.uow, "update user", |txn| {
            let context = format!("Cannot update user id={}", id);

            let user = UserEntity::find_by_id(id)
                .one(txn)
                .await
                .map_err(|e| StoreError::fault(context.clone(), e))?;

            let Some(user) = user else {
                tracing::warn!("Cannot update: user not found, id={}", id);
                return Err(StoreError::row_missing(context, id));
            };

            // created_at stays Unchanged and is left out of the UPDATE
            let (name, email, age) = fields.into_parts();
            let mut active: ActiveModel = user.into();
            active.name = Set(name);
            active.email = Set(email);
            active.age = Set(age);

            active
                .update(txn)
                .await
                .map_err(|e| StoreError::from_db(context, e))?;
            Ok(())
        })?;

        tracing::info!("User updated, id={}", id);
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        with_transaction!(self.uow, "delete user", |txn| {
            let context = format!("Cannot delete user id={}", id);

            let user = UserEntity::find_by_id(id)
                .one(txn)
                .await
                .map_err(|e| StoreError::fault(context.clone(), e))?;

            let Some(user) = user else {
                tracing::warn!("Cannot delete: user not found, id={}", id);
                return Err(StoreError::row_missing(context, id));
            };

            user.delete(txn)
                .await
                .map_err(|e| StoreError::fault(context, e))?;
            Ok(())
        })?;

        tracing::info!("User deleted, id={}", id);
        Ok(())
    }
}
