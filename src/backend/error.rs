//! Errors returned by backend calls, classified by HTTP status.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: missing, expired or rejected credential.
    #[error("unauthorized")]
    Unauthorized,

    /// 400: the backend refused the request as given (duplicates, mostly).
    #[error("bad request: {}", .detail.as_deref().unwrap_or("no detail"))]
    BadRequest { detail: Option<String> },

    #[error("not found")]
    NotFound,

    /// 422: field validation failed.
    #[error("validation failed: {}", .detail.as_deref().unwrap_or("no detail"))]
    Validation { detail: Option<String> },

    #[error("unexpected status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Classifies a non-success response from its status and body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            400 => ApiError::BadRequest { detail },
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            422 => ApiError::Validation { detail },
            _ => ApiError::Status { status, detail },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::BadRequest { .. } => Some(400),
            ApiError::NotFound => Some(404),
            ApiError::Validation { .. } => Some(422),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// The backend's own explanation, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { detail }
            | ApiError::Validation { detail }
            | ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}` or `{"message": "..."}`.
fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|first| first.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => json.get("message").and_then(Value::as_str).map(str::to_string),
    }
}
