//! Error types for interpolation.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type alias for interpolation operations.
pub type InterpolResult<T> = Result<T, InterpolError>;

/// Errors that can occur while interpolating a template.
#[derive(Error, Debug)]
pub enum InterpolError {
    #[error("Unsupported key type {key_type} in data source {source_type}: keys must be strings")]
    UnsupportedKeyType {
        source_type: String,
        key_type: String,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Unsupported value type {value_type} for key {key}")]
    UnsupportedValueType { key: String, value_type: String },

    #[error("Unterminated placeholder at offset {offset}")]
    UnterminatedPlaceholder { offset: usize },

    #[error("Interpolated output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}
