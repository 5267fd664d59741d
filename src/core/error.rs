use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Currency;

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, PluginError>;

/// Error codes the host shows next to a rejected configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginErrorCode {
    Invalid,
    Required,
}

impl fmt::Display for PluginErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginErrorCode::Invalid => write!(f, "INVALID"),
            PluginErrorCode::Required => write!(f, "REQUIRED"),
        }
    }
}

/// Main plugin error type
#[derive(thiserror::Error, Debug)]
pub enum PluginError {
    /// Rejected plugin configuration, reported against a single field
    #[error("Configuration error on {field} ({code}): {message}")]
    Configuration {
        field: String,
        code: PluginErrorCode,
        message: String,
    },

    /// Malformed pricing input handed over by the host
    #[error("Validation error: {0}")]
    Validation(String),

    /// Money values of different currencies were combined
    #[error("Currency mismatch: expected {expected}, got {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Unknown currency code
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// No plugin registered under the requested identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Helper functions for common error scenarios
impl PluginError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        PluginError::Configuration {
            field: field.into(),
            code: PluginErrorCode::Invalid,
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        PluginError::Configuration {
            field: field.into(),
            code: PluginErrorCode::Required,
            message: message.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        PluginError::Validation(msg.into())
    }

    /// Field name and code of a configuration error, if this is one
    pub fn configuration_field(&self) -> Option<(&str, PluginErrorCode)> {
        match self {
            PluginError::Configuration { field, code, .. } => Some((field.as_str(), *code)),
            _ => None,
        }
    }
}
