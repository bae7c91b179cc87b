//! Domain-level constants.
//!
//! These constants define the field limits enforced before any write
//! reaches the store. The schema mirrors the length limits.

// =============================================================================
// Field limits
// =============================================================================

/// Maximum name length (in characters, after trimming)
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length (in characters, after trimming)
pub const MAX_EMAIL_LENGTH: usize = 150;

/// Youngest accepted age
pub const MIN_AGE: i32 = 0;

/// Oldest accepted age
pub const MAX_AGE: i32 = 150;

// =============================================================================
// Storage
// =============================================================================

/// Name of the unique index on `users.email`
pub const EMAIL_UNIQUE_INDEX: &str = "uk_users_email";
