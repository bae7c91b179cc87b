//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, its field limits and the validation rules applied
//! before anything reaches storage.

pub mod constants;
pub mod error;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainResult, ValidationError};
pub use user::{User, UserFields};
pub use validation::{validate_age, validate_email, validate_id, validate_name};
