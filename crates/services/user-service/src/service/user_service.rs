//! User service - validation and existence guards in front of the gateway.
//!
//! Input is validated before any storage call; the first failed rule is
//! returned as `InvalidInput`. Update and delete check existence first
//! and return `RecordNotFound` without writing. Every gateway error is
//! wrapped in `OperationFailed`.
//!
//! The existence check and the write are separate units of work. A
//! concurrent delete in between is caught by the gateway's own load and
//! surfaces as `OperationFailed`, not `RecordNotFound`.

use async_trait::async_trait;
use std::sync::Arc;

use common::{ServiceError, ServiceResult};
use domain::{validate_id, User, UserFields};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user and return the identifier assigned by the store
    async fn create(&self, name: &str, email: &str, age: i32) -> ServiceResult<i64>;

    /// Find user by ID; absence is `Ok(None)`
    async fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>>;

    /// List all users
    async fn find_all(&self) -> ServiceResult<Vec<User>>;

    /// Replace name, email and age of an existing user
    async fn update_by_id(&self, id: i64, name: &str, email: &str, age: i32) -> ServiceResult<()>;

    /// Delete an existing user
    async fn delete_by_id(&self, id: i64) -> ServiceResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_exists(&self, id: i64, context: &str) -> ServiceResult<()> {
        let existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::operation_failed(context, e))?;

        match existing {
            Some(_) => Ok(()),
            None => Err(ServiceError::RecordNotFound(id)),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create(&self, name: &str, email: &str, age: i32) -> ServiceResult<i64> {
        let fields = UserFields::parse(name, email, age)?;

        self.repo
            .create(fields)
            .await
            .map_err(|e| ServiceError::operation_failed("Cannot create user due to data access error.", e))
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        validate_id(id)?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::operation_failed("Cannot find user due to data access error.", e))
    }

    async fn find_all(&self) -> ServiceResult<Vec<User>> {
        self.repo
            .find_all()
            .await
            .map_err(|e| ServiceError::operation_failed("Cannot load users due to data access error.", e))
    }

    async fn update_by_id(&self, id: i64, name: &str, email: &str, age: i32) -> ServiceResult<()> {
        const CONTEXT: &str = "Cannot update user due to data access error.";

        validate_id(id)?;
        let fields = UserFields::parse(name, email, age)?;

        self.ensure_exists(id, CONTEXT).await?;

        self.repo
            .update_by_id(id, fields)
            .await
            .map_err(|e| ServiceError::operation_failed(CONTEXT, e))
    }

    async fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        const CONTEXT: &str = "Cannot delete user due to data access error.";

        validate_id(id)?;

        self.ensure_exists(id, CONTEXT).await?;

        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| ServiceError::operation_failed(CONTEXT, e))
    }
}
