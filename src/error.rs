//! API Errors
//!
//! Failure taxonomy of a backend call and extraction of the most helpful
//! human-readable message from a server response.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Network or CORS failure, the request never got a response
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Missing or invalid input caught before a request was issued
    #[error("{0}")]
    Validation(String),

    /// 2xx response whose body did not have the expected shape
    #[error("Respons server tidak valid: {0}")]
    Malformed(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Expired or missing token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Build the error for a non-2xx response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Http {
            status,
            message: extract_message(body)
                .unwrap_or_else(|| format!("Permintaan gagal (HTTP {})", status)),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Best message from an error body: the structured `error` field, then the
/// generic `message` field, then short plain text.
pub fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            let from_error = match json.get("error") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Object(obj)) => obj
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            };
            from_error
                .or_else(|| json.get("message").and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.trim().is_empty())
        }
        // HTML error pages are noise, plain text is usually the message itself
        Err(_) if !body.starts_with('<') && body.len() <= 300 => Some(body.to_string()),
        Err(_) => None,
    }
}
