//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::validation::{validate_age, validate_email, validate_name};

/// User domain entity.
///
/// Only exists once the store has accepted the record: `id` and
/// `created_at` are assigned by the insert and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The mutable part of the record
    pub fn fields(&self) -> UserFields {
        UserFields {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User(id={}, name={}, email={}, age={}, created_at={})",
            self.id,
            self.name,
            self.email,
            self.age,
            self.created_at.to_rfc3339()
        )
    }
}

/// Validated, trimmed mutable fields of a user.
///
/// This is also the in-memory form of a record that has not been stored
/// yet: it carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    name: String,
    email: String,
    age: i32,
}

impl UserFields {
    /// Validate raw input in name, email, age order and keep trimmed values.
    ///
    /// # Errors
    /// Returns the first failed rule.
    pub fn parse(name: &str, email: &str, age: i32) -> DomainResult<Self> {
        let name = validate_name(name)?;
        let email = validate_email(email)?;
        let age = validate_age(age)?;

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Consume into `(name, email, age)`
    pub fn into_parts(self) -> (String, String, i32) {
        (self.name, self.email, self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_text_fields() {
        let fields = UserFields::parse("  Ann  ", "  ann@ex.com  ", 30).unwrap();

        assert_eq!(fields.name(), "Ann");
        assert_eq!(fields.email(), "ann@ex.com");
        assert_eq!(fields.age(), 30);
    }

    #[test]
    fn test_parse_reports_first_failure() {
        // Name is checked before email and age
        let err = UserFields::parse(" ", "nope", 999).unwrap_err();
        assert_eq!(err.message(), "name must not be blank.");

        // Email before age
        let err = UserFields::parse("Ann", "nope", 999).unwrap_err();
        assert!(err.message().starts_with("email looks invalid"));

        let err = UserFields::parse("Ann", "ann@ex.com", 999).unwrap_err();
        assert_eq!(err.message(), "age must be between 0 and 150.");
    }

    #[test]
    fn test_user_fields_roundtrip() {
        let user = User {
            id: 4,
            name: "Ann".to_string(),
            email: "ann@ex.com".to_string(),
            age: 30,
            created_at: Utc::now(),
        };

        let (name, email, age) = user.fields().into_parts();
        assert_eq!((name.as_str(), email.as_str(), age), ("Ann", "ann@ex.com", 30));
    }

    #[test]
    fn test_user_serializes_all_fields() {
        let user = User {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@ex.com".to_string(),
            age: 30,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "ann@ex.com");
        assert!(json["created_at"].is_string());
    }
}
