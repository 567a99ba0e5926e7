use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::error::AppError;

/// A persisted refresh token: the server-side half of a login.
///
/// The token string is the lookup key. Records are never updated; a refresh
/// deletes the old record and stores a new one.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Expiry is derived, not stored: a session is expired once `now >= expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn verify_not_expired(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.is_expired_at(now) {
            return Err(AppError::TokenExpired);
        }
        Ok(())
    }
}

/// A session about to be stored. The repository assigns the ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub user_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// A refresh token supplied by a client, trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(AppError::TokenEmpty);
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
