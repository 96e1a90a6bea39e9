//! Error types for condition tree serialization.

use thiserror::Error;

/// Broad category of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The value handed to `dumps` was not a condition tree.
    InputType,
    /// Decoded text does not describe a well-formed condition tree.
    MalformedTree,
    /// The underlying text codec failed.
    Codec,
    /// The serializer options cannot be honoured by its text format.
    Config,
}

/// Errors that can occur while encoding or decoding a condition tree.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Input is not a condition node: got {type_name}")]
    InputType { type_name: &'static str },

    #[error("Malformed tree: missing key '{key}'")]
    MissingKey { key: &'static str },

    #[error("Malformed tree: field '{key}' {reason}")]
    InvalidField { key: &'static str, reason: String },

    #[error("Malformed tree: expected an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("Malformed tree: nesting depth exceeds maximum of {max}")]
    DepthExceeded { max: usize },

    #[error("Malformed tree: nesting of {depth} exceeds the format limit of {limit}")]
    NestingExceeded { depth: usize, limit: usize },

    #[error("Invalid serializer config: {reason}")]
    InvalidConfig { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Cannot represent {value} as a timestamp")]
    Timestamp { value: String },

    #[error("Cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),
}

impl QueryError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::InputType { .. } => ErrorKind::InputType,
            QueryError::MissingKey { .. }
            | QueryError::InvalidField { .. }
            | QueryError::NotAnObject { .. }
            | QueryError::DepthExceeded { .. }
            | QueryError::NestingExceeded { .. } => ErrorKind::MalformedTree,
            QueryError::InvalidConfig { .. } => ErrorKind::Config,
            QueryError::Json(_)
            | QueryError::Base64(_)
            | QueryError::Utf8(_)
            | QueryError::Timestamp { .. }
            | QueryError::NonFiniteFloat(_) => ErrorKind::Codec,
        }
    }

    pub(crate) fn invalid_field(key: &'static str, reason: impl Into<String>) -> Self {
        QueryError::InvalidField {
            key,
            reason: reason.into(),
        }
    }
}

/// Result type for serializer operations.
pub type QueryResult<T> = Result<T, QueryError>;
