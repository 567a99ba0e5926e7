//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type used by every layer of the service:
//! repositories, use cases and HTTP handlers all return it, and no layer wraps
//! another layer's error.
//!
//! `AppError` implements `actix_web::error::ResponseError`. That impl is the only
//! place where an error becomes an HTTP status and a human readable message.
//! Every variant that is not a known business error collapses to a generic
//! 500 response, and the underlying cause is logged instead of being sent to
//! the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::ErrorBody;

/// Message returned to clients for every unclassified failure.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Something went wrong";

/// Convenience alias used across repositories and use cases.
pub type AppResult<T> = Result<T, AppError>;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed a validation rule. Carries the client-facing message.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Request could not be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Refresh token was blank after trimming.
    #[error("refresh token is empty")]
    TokenEmpty,
    /// Login email does not belong to any user.
    #[error("email does not exist")]
    EmailNotFound,
    /// Login password does not match the stored digest.
    #[error("password is incorrect")]
    PasswordIncorrect,
    /// The stored session for a refresh token is past its expiry.
    #[error("refresh token is expired")]
    TokenExpired,
    /// A delete by token affected no rows.
    #[error("authentication does not exist")]
    AuthNotExist,
    /// No session is stored for the given refresh token.
    #[error("authentication not found")]
    SessionNotFound,

    /// Registration email is already taken.
    #[error("email is not available")]
    EmailNotAvailable,
    #[error("user not found")]
    UserNotFound,
    #[error("task not found")]
    TaskNotFound,
    /// Task exists but belongs to another user.
    #[error("task belongs to another user")]
    TaskForbidden,
    #[error("project not found")]
    ProjectNotFound,
    /// Project exists but belongs to another user.
    #[error("project belongs to another user")]
    ProjectForbidden,

    /// No `Authorization: Bearer` header on a protected route.
    #[error("bearer token missing")]
    MissingBearerToken,
    #[error("access token is expired")]
    AccessTokenExpired,
    /// Access token is malformed, badly signed or otherwise unusable.
    #[error("access token is invalid: {0}")]
    AccessTokenInvalid(String),

    /// The per-request deadline elapsed before the use case finished.
    #[error("request deadline exceeded")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the client-facing message for this error.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::TokenEmpty => "Refresh token is required field".into(),
            AppError::EmailNotFound => "Email is not exist".into(),
            AppError::PasswordIncorrect => "Password is incorrect".into(),
            AppError::TokenExpired => "Refresh token is expired".into(),
            AppError::AuthNotExist => "Authentication is not exist".into(),
            AppError::SessionNotFound => "Authentication not found".into(),
            AppError::EmailNotAvailable => "Email is not available".into(),
            AppError::UserNotFound => "User not found".into(),
            AppError::TaskNotFound => "Task not found".into(),
            AppError::TaskForbidden => "Not have access to this task".into(),
            AppError::ProjectNotFound => "Project not found".into(),
            AppError::ProjectForbidden => "Not have access to this project".into(),
            AppError::MissingBearerToken => "Authentication bearer token are not provided".into(),
            AppError::AccessTokenExpired => "Access token is expired".into(),
            AppError::AccessTokenInvalid(_) => "Access token is invalid".into(),
            AppError::Timeout => "Request timed out".into(),
            AppError::Database(_) | AppError::Token(_) | AppError::Hash(_) | AppError::Internal(_) => {
                INTERNAL_SERVER_ERROR_MESSAGE.into()
            }
        }
    }
}

/// Converts `AppError` variants into the JSON error envelope.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::TokenEmpty
            | AppError::EmailNotFound
            | AppError::PasswordIncorrect
            | AppError::TokenExpired
            | AppError::AuthNotExist
            | AppError::EmailNotAvailable => StatusCode::BAD_REQUEST,
            AppError::MissingBearerToken
            | AppError::AccessTokenExpired
            | AppError::AccessTokenInvalid(_) => StatusCode::UNAUTHORIZED,
            AppError::TaskForbidden | AppError::ProjectForbidden => StatusCode::FORBIDDEN,
            AppError::SessionNotFound
            | AppError::UserNotFound
            | AppError::TaskNotFound
            | AppError::ProjectNotFound => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Token(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("request rejected: {}", self);
        }
        HttpResponse::build(status).json(ErrorBody::new(status, self.client_message()))
    }
}

/// Order in which request fields are checked. Fields not listed come after,
/// by name.
const FIELD_PRIORITY: [&str; 6] = ["email", "password", "name", "refresh_token", "content", "title"];

/// Picks the message of the first failing field in `FIELD_PRIORITY` order.
///
/// Each field's rules run in declaration order, so the first error of a field
/// is the most basic one (e.g. "required" before "must be a valid email").
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| {
            let rank = FIELD_PRIORITY
                .iter()
                .position(|known| known == field)
                .unwrap_or(FIELD_PRIORITY.len());
            (rank, *field)
        });

        let message = fields
            .first()
            .and_then(|(_, errs)| errs.first())
            .and_then(|err| err.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Invalid request body".to_string());

        AppError::Validation(message)
    }
}
