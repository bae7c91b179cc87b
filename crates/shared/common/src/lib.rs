//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The two-tier error taxonomy (store errors and service errors)
//! - Configuration structures
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{FaultCause, ServiceError, ServiceResult, StoreError, StoreResult};
pub use telemetry::init_tracing;
