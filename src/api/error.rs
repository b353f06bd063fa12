use serde_json::Value;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Errors returned by calls to the employee management API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from the API
    #[error("Unauthorized: {}", detail.as_deref().unwrap_or("credentials rejected"))]
    Unauthorized { detail: Option<String> },

    /// 403 from the API
    #[error("Forbidden: {}", detail.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden { detail: Option<String> },

    /// Any other unsuccessful status
    #[error("API returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// A success response whose body could not be decoded
    #[error("Unexpected response from API: {0}")]
    InvalidResponse(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl ApiError {
    /// Build the error for a non-success status and its (possibly empty) body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| extract_detail(&v));
        match status {
            401 => ApiError::Unauthorized { detail },
            403 => ApiError::Forbidden { detail },
            _ => ApiError::Rejected { status, detail },
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Forbidden { detail }
            | ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Message shown to the user: the server's detail when it sent one,
    /// `Network error` when nothing came back, the fallback otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        if self.is_network() {
            return NETWORK_ERROR_MESSAGE.to_string();
        }
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// Pull a human readable message out of an error body.
///
/// The API answers with `{"detail": "..."}`, or for request validation
/// failures with `{"detail": [{"msg": "...", ...}, ...]}`.
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .map(|m| m.to_string()),
        _ => None,
    }
}
