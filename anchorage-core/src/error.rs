// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Error Types
//!
//! Positioning itself never fails: every input produces some placement.
//! The errors here cover the typed session preconditions and configuration
//! loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a positioning session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session has never been applied, so there is no last position.
    #[error("Session has no applied position")]
    NotApplied,

    /// The session was detached; it has to be applied again first.
    #[error("Session is detached")]
    Detached,
}

/// Errors that can occur while loading positioning configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file was not found.
    #[error("Configuration file not found: {path:?}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Error parsing configuration content.
    #[error("Failed to parse configuration: {details}")]
    Parse {
        /// Details about the parse error.
        details: String,
    },

    /// A value parsed fine but is out of range.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a parse error.
    pub fn parse(details: impl Into<String>) -> Self {
        Self::Parse {
            details: details.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::parse(err.to_string())
    }
}
