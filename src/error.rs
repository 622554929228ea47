//! Error types for schema resolution and data generation

use thiserror::Error;

/// Errors that can occur while resolving schemas, configuring the
/// randomness provider, or generating data.
#[derive(Debug, Error)]
pub enum TycheError {
    /// Schema reference string is malformed
    #[error("invalid schema reference '{0}': expected 'path/to/document.yaml:SchemaName'")]
    InvalidReference(String),

    /// Schema document could not be read
    #[error("schema document '{path}' could not be read: {source}")]
    DocumentNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File exists but is not a valid schema document
    #[error("'{path}' is not a valid schema document: {reason}")]
    InvalidDocument { path: String, reason: String },

    /// Named schema is absent from the document
    #[error("schema '{name}' not found in document '{path}'")]
    SchemaNotFound { name: String, path: String },

    /// Locale identifier not supported by the randomness provider
    #[error("unknown locale '{0}' (supported: en, fr_FR, ja_JP, pt_BR, zh_CN, zh_TW, ar_SA)")]
    UnknownLocale(String),

    /// Bulk generation failed; no partial batch is emitted
    #[error("failed to generate data for schema '{schema}': {reason}")]
    Generation { schema: String, reason: String },

    /// Serialization error while writing output
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tyche operations
pub type Result<T> = std::result::Result<T, TycheError>;
