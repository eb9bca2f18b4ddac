//! Error types for the API client.
//!
//! Non-2xx responses are classified by status code into one of five kinds.
//! The server's error body is kept alongside so callers can show the
//! per-field breakdown BoldDesk returns for bad requests.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitSnapshot;

/// One entry of the `errors` array in a BoldDesk error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub error_type: String,
}

/// Error body returned by BoldDesk on non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    /// Parses an error body. Blank bodies give `None`; anything that is not a
    /// JSON envelope is wrapped so the raw text still reaches the caller.
    /// JSON without a `message` or `errors` counts as not an envelope.
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.message.is_empty() || !envelope.errors.is_empty() => {
                Some(envelope)
            }
            _ => Some(Self::raw(body)),
        }
    }

    fn raw(body: &str) -> Self {
        Self {
            message: body.to_string(),
            status_code: 0,
            errors: vec![FieldError {
                field: String::new(),
                error_message: body.to_string(),
                error_type: String::new(),
            }],
        }
    }

    /// Groups error messages by field name, keeping server order per field.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for err in &self.errors {
            map.entry(err.field.clone())
                .or_default()
                .push(err.error_message.clone());
        }
        map
    }

    /// Messages reported for a single field, matched case-insensitively.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field.eq_ignore_ascii_case(field))
            .map(|e| e.error_message.as_str())
            .collect()
    }
}

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP 401: the API key was missing or rejected.
    #[error("Authentication failed (HTTP {status})")]
    Authentication {
        status: u16,
        envelope: Option<ErrorEnvelope>,
    },
    /// HTTP 400: the request body or parameters failed server validation.
    #[error("Validation failed (HTTP {status})")]
    Validation {
        status: u16,
        envelope: Option<ErrorEnvelope>,
    },
    /// HTTP 429: the request budget for the current window is spent.
    #[error("Rate limit exceeded (HTTP {status})")]
    RateLimit {
        status: u16,
        envelope: Option<ErrorEnvelope>,
        rate_limit: Option<RateLimitSnapshot>,
    },
    /// The transport gave up before any response arrived.
    #[error("Request to {url} timed out after {elapsed_ms} ms")]
    Timeout { url: String, elapsed_ms: u64 },
    /// Any other non-success status.
    #[error("Request failed with status {status}")]
    Api {
        status: u16,
        envelope: Option<ErrorEnvelope>,
    },
    /// Connection-level failure with no HTTP response.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// A success response whose body did not match the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode { message: String, body: String },
    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Classifies a non-success response. Every status maps to some variant.
    pub fn from_response(status: u16, body: &str, rate_limit: Option<RateLimitSnapshot>) -> Self {
        let envelope = ErrorEnvelope::parse(body);
        match status {
            400 => Error::Validation { status, envelope },
            401 => Error::Authentication { status, envelope },
            429 => Error::RateLimit {
                status,
                envelope,
                rate_limit,
            },
            _ => Error::Api { status, envelope },
        }
    }

    /// HTTP status for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. }
            | Error::Validation { status, .. }
            | Error::RateLimit { status, .. }
            | Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            Error::Timeout { .. } | Error::Decode { .. } | Error::InvalidUrl(_) => None,
        }
    }

    /// The parsed server error body, when there was one.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            Error::Authentication { envelope, .. }
            | Error::Validation { envelope, .. }
            | Error::RateLimit { envelope, .. }
            | Error::Api { envelope, .. } => envelope.as_ref(),
            _ => None,
        }
    }

    /// Human-readable message: the server's when it sent one, otherwise
    /// a default for the error kind.
    pub fn message(&self) -> String {
        if let Some(envelope) = self.envelope() {
            if !envelope.message.is_empty() {
                return envelope.message.clone();
            }
        }
        match self {
            Error::Authentication { .. } => "Authentication failed. Check the API key.".to_string(),
            Error::Validation { .. } => "The request was rejected as invalid.".to_string(),
            Error::RateLimit { .. } => "Rate limit exceeded.".to_string(),
            Error::Api { status, .. } => format!("Request failed with status {}", status),
            other => other.to_string(),
        }
    }

    /// Field name to messages. Empty when the server sent no detail.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.envelope()
            .map(ErrorEnvelope::field_errors)
            .unwrap_or_default()
    }

    /// Suggested wait before retrying a rate-limited call.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimit {
                rate_limit: Some(snapshot),
                ..
            } => snapshot.retry_after(Utc::now()),
            _ => None,
        }
    }
}
