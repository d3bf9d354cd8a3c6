//! Error types for loading and configuration.
//!
//! Load errors never escape view construction: they are logged and the view
//! degrades to a static image. Descriptor errors are the only ones callers see.

use serde::{Deserialize, Serialize};

/// Failure to obtain an animation (or its overlay) from the host.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LoadError {
    /// No resource resolves for the identifier
    #[error("Resource not found: {id}")]
    ResourceMissing { id: String },

    /// Stream present but not a valid animated image
    #[error("Decode failure: {reason}")]
    DecodeFailure { reason: String },

    /// IO error while reading the resource stream
    #[error("IO error: {reason}")]
    Io { reason: String },
}

impl LoadError {
    /// Create a decode failure
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::DecodeFailure {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ResourceMissing { .. } => "resource",
            Self::DecodeFailure { .. } => "decode",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}

/// Malformed declarative view configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Invalid descriptor JSON: {reason}")]
    Json { reason: String },

    #[error("Attribute '{name}' expects a boolean, got '{value}'")]
    NotABoolean { name: String, value: String },
}

impl From<serde_json::Error> for DescriptorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            reason: err.to_string(),
        }
    }
}
