//! Two-tier error handling.
//!
//! - [`StoreError`] is raised by the persistence gateway. It separates
//!   uniqueness conflicts from every other storage fault.
//! - [`ServiceError`] is what callers of the application service see:
//!   bad input, an absent record, or an opaque failed operation wrapping
//!   the store error for diagnostics.

use domain::ValidationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

// =============================================================================
// Persistence gateway errors
// =============================================================================

/// Why a storage operation faulted.
#[derive(Error, Debug)]
pub enum FaultCause {
    /// The driver or database reported an error
    #[error(transparent)]
    Database(#[from] DbErr),

    /// The row targeted by an update or delete was not there
    #[error("user not found, id={0}")]
    RowMissing(i64),
}

/// Errors raised by the persistence gateway. The unit of work has already
/// been rolled back when one of these reaches the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected the write on a uniqueness rule
    #[error("{context}: constraint violation (maybe email already exists)")]
    ConstraintViolation {
        context: String,
        #[source]
        source: DbErr,
    },

    /// Any other storage failure
    #[error("{context}")]
    StorageFault {
        context: String,
        #[source]
        cause: FaultCause,
    },
}

impl StoreError {
    /// Classify a database error raised by a write.
    pub fn from_db(context: impl Into<String>, err: DbErr) -> Self {
        let context = context.into();
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::ConstraintViolation {
                context,
                source: err,
            },
            _ => StoreError::fault(context, err),
        }
    }

    /// Storage fault caused by a database error
    pub fn fault(context: impl Into<String>, err: DbErr) -> Self {
        StoreError::StorageFault {
            context: context.into(),
            cause: FaultCause::Database(err),
        }
    }

    /// Storage fault for a row that vanished under an update or delete
    pub fn row_missing(context: impl Into<String>, id: i64) -> Self {
        StoreError::StorageFault {
            context: context.into(),
            cause: FaultCause::RowMissing(id),
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation { .. })
    }

    pub fn is_row_missing(&self) -> bool {
        matches!(
            self,
            StoreError::StorageFault {
                cause: FaultCause::RowMissing(_),
                ..
            }
        )
    }
}

/// Result type alias for the persistence gateway
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Application service errors
// =============================================================================

/// Errors returned by the application service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Caller error; the input never reached storage
    #[error("{0}")]
    InvalidInput(String),

    /// Expected outcome of update/delete on an absent record
    #[error("User not found, id={0}")]
    RecordNotFound(i64),

    /// Storage-layer failure
    #[error("{context}")]
    OperationFailed {
        context: String,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "INVALID_INPUT",
            ServiceError::RecordNotFound(_) => "RECORD_NOT_FOUND",
            ServiceError::OperationFailed { .. } => "OPERATION_FAILED",
        }
    }

    /// Get user-facing message (hides storage details)
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::InvalidInput(msg) => msg.clone(),
            ServiceError::RecordNotFound(_) => self.to_string(),
            ServiceError::OperationFailed { context, source } => {
                tracing::error!(error = ?source, "{}", context);
                context.clone()
            }
        }
    }

    /// Wrap a gateway failure
    pub fn operation_failed(context: impl Into<String>, source: StoreError) -> Self {
        ServiceError::OperationFailed {
            context: context.into(),
            source,
        }
    }

    /// The underlying store error, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            ServiceError::OperationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidInput(err.message().to_string())
    }
}

/// Result type alias for the application service
pub type ServiceResult<T> = Result<T, ServiceError>;
