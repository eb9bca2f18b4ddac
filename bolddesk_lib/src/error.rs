//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration, I/O and input validation failures.
#[derive(Debug)]
pub enum BoldDeskError {
    /// An error from the underlying API client.
    Api(bolddesk_api::Error),
    /// Configuration is missing or unusable.
    Config(String),
    /// Reading a configuration file failed.
    Io(std::io::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl BoldDeskError {
    /// The API error, when this wraps one.
    pub fn as_api(&self) -> Option<&bolddesk_api::Error> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for BoldDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for BoldDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bolddesk_api::Error> for BoldDeskError {
    fn from(e: bolddesk_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for BoldDeskError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
