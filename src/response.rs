//! JSON envelopes shared by every endpoint.
//!
//! Success: `{status_code, message, payload}`.
//! Failure: `{status_code, message, error}` where `message` is the canonical
//! status text and `error` names what went wrong.

use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessBody<T> {
    pub status_code: u16,
    pub message: String,
    pub payload: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: status_text(status),
            error: error.into(),
        }
    }
}

/// Builds a success response. An empty `message` falls back to the status text.
pub fn success<T: Serialize>(status: StatusCode, message: &str, payload: T) -> HttpResponse {
    let message = if message.is_empty() {
        status_text(status)
    } else {
        message.to_string()
    };
    HttpResponse::build(status).json(SuccessBody {
        status_code: status.as_u16(),
        message,
        payload,
    })
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
