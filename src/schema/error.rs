//! Schema import error types

use thiserror::Error;

/// Errors that can occur while importing a schema document
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Top-level schema does not describe an object
    #[error("Expected an object schema, found {0}")]
    NotAnObject(String),

    /// Reference outside the local definitions
    #[error("Unsupported reference: {0}")]
    UnresolvedRef(String),

    /// Local definition missing from the document
    #[error("Definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("Maximum schema depth ({0}) exceeded")]
    MaxDepthExceeded(usize),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for schema import
pub type SchemaResult<T> = Result<T, SchemaError>;
