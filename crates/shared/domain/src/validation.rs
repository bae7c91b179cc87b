//! Input validation rules for user fields.
//!
//! Each rule checks one raw input and, for text, returns the trimmed
//! value. Rules run before any storage access; callers chain them with
//! `?` so the first failure wins.

use crate::constants::{MAX_AGE, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MIN_AGE};
use crate::error::{DomainResult, ValidationError};

/// Identifier must be strictly positive.
pub fn validate_id(id: i64) -> DomainResult<i64> {
    if id <= 0 {
        return Err(ValidationError::new("id must be a positive number."));
    }
    Ok(id)
}

/// Name must be non-blank and at most `MAX_NAME_LENGTH` characters once trimmed.
pub fn validate_name(name: &str) -> DomainResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("name must not be blank."));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(format!(
            "name length must be <= {}.",
            MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed)
}

/// Email must be non-blank, at most `MAX_EMAIL_LENGTH` characters and look
/// like `local@domain.tld` once trimmed.
pub fn validate_email(email: &str) -> DomainResult<&str> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("email must not be blank."));
    }
    if trimmed.chars().count() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::new(format!(
            "email length must be <= {}.",
            MAX_EMAIL_LENGTH
        )));
    }
    if !has_email_shape(trimmed) {
        return Err(ValidationError::new(
            "email looks invalid (expected something like name@example.com).",
        ));
    }
    Ok(trimmed)
}

/// Age must fall within `MIN_AGE..=MAX_AGE`.
pub fn validate_age(age: i32) -> DomainResult<i32> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::new(format!(
            "age must be between {} and {}.",
            MIN_AGE, MAX_AGE
        )));
    }
    Ok(age)
}

/// Shape check on character positions: first `@` after position 0, last
/// `.` at least two characters after it, and something after the last `.`.
fn has_email_shape(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();
    let at = chars.iter().position(|&c| c == '@');
    let dot = chars.iter().rposition(|&c| c == '.');

    match (at, dot) {
        (Some(at), Some(dot)) => at > 0 && dot > at + 1 && dot + 1 < chars.len(),
        _ => false,
    }
}
