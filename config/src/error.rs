//! Error types for configuration loading.
//!
//! Provides a unified error type covering I/O, serialization, unsupported
//! file formats and option tables that fail the well-formedness checks.

use thiserror::Error;
use usage_core::TableError;

/// Errors that can occur while loading or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The declared option table is malformed.
    #[error("invalid option table: {}", summarize(.0))]
    InvalidTable(Vec<TableError>),
}

fn summarize(errors: &[TableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
