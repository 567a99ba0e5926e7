use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A registered account. `password_hash` never leaves the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user about to be stored; `password_hash` is already a digest.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required field"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required field"),
        email(message = "Email must be a valid email address")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(custom = "validate_password")]
    pub password: String,
}

impl UserInput {
    /// Removes leading and trailing whitespace from every field.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.password = self.password.trim().to_string();
    }
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        let mut err = ValidationError::new("password_empty");
        err.message = Some(Cow::from("Password is required field"));
        return Err(err);
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("password_too_short");
        err.message = Some(Cow::from(format!(
            "Password must be greater then {} character in length",
            MIN_PASSWORD_LENGTH
        )));
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
}
