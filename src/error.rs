// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend error types shared by the client and the diagnostic programs.

use serde::Deserialize;

/// Error returned by any call against the hosted backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        hint: Option<String>,
    },

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl BackendError {
    /// PostgREST code for "more than one relationship was found".
    pub const AMBIGUOUS_RELATIONSHIP: &'static str = "PGRST201";

    /// Whether the storage object (or row) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }

    /// Whether a join failed because it needs an explicit foreign-key hint.
    pub fn is_ambiguous_relationship(&self) -> bool {
        matches!(
            self,
            BackendError::Api { code: Some(code), .. } if code == Self::AMBIGUOUS_RELATIONSHIP
        )
    }

    /// Classify a non-success response body.
    ///
    /// PostgREST answers with `{code, message, details, hint}`; the storage
    /// API answers with `{statusCode, error, message}` and reports missing
    /// objects as HTTP 400 with `statusCode: "404"`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        let message = parsed
            .message
            .clone()
            .or_else(|| parsed.error.clone())
            .unwrap_or_else(|| body.trim().to_string());

        let storage_status = parsed.status_code.as_ref().and_then(|v| match v {
            serde_json::Value::String(s) => s.parse::<u16>().ok(),
            serde_json::Value::Number(n) => n.as_u64().map(|n| n as u16),
            _ => None,
        });

        // PostgREST errors carry a code and stay `Api` even on 404 (e.g. PGRST205)
        let not_found = parsed.code.is_none()
            && (status == 404
                || storage_status == Some(404)
                || parsed.error.as_deref() == Some("not_found")
                || message.eq_ignore_ascii_case("object not found"));

        if not_found {
            return BackendError::NotFound(message);
        }

        BackendError::Api {
            status,
            code: parsed.code,
            message,
            hint: parsed.hint,
        }
    }
}

/// Union of the error body shapes returned by the REST and storage APIs.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    hint: Option<String>,
    error: Option<String>,
    #[serde(rename = "statusCode")]
    status_code: Option<serde_json::Value>,
}

/// Result type alias for backend calls
pub type Result<T> = std::result::Result<T, BackendError>;
