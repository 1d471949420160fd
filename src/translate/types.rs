//! Translation request/response schema and transport errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code a backend reports for a successful translation.
pub const SUCCESS_CODE: i64 = 200;

/// A translation request, forwarded verbatim to backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateRequest {
    /// Text to translate.
    pub text: String,
    /// Source language code (e.g. "EN", or "auto").
    pub source_lang: String,
    /// Target language code (e.g. "ZH").
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// A translation response as returned by a backend.
///
/// The default value is the "nothing translated" response handed back when
/// every backend failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateResponse {
    pub code: i64,
    pub id: i64,
    /// Translated text.
    pub data: String,
    pub alternatives: Vec<String>,
    pub source_lang: String,
    pub target_lang: String,
    pub method: String,
}

impl TranslateResponse {
    /// True when the backend reported success and actually produced text.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE && !self.data.is_empty()
    }
}

/// Errors that can occur while talking to a single backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or body decoding failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// Failure reported by a non-HTTP transport.
    #[error("transport error: {0}")]
    Other(String),
}

/// Result type for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;
