//! Error types for dialect translation.

/// Errors that can occur while translating or issuing dialect SQL.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// A LIMIT or OFFSET value is not an integer.
    #[error("invalid limit/offset value '{value}': expected an integer")]
    InvalidBound {
        /// The rejected input, as given.
        value: String,
    },

    /// A field kind has no SQLite column type.
    #[error("invalid sql type {type_name} for field '{field}' in sqlite")]
    UnsupportedType {
        /// Name of the field being mapped.
        field: String,
        /// Name of the Rust/host type that could not be mapped.
        type_name: String,
    },

    /// Database error while executing a DDL statement.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Dialect options could not be deserialized.
    #[error("invalid dialect options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
