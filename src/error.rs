//! Error types for provenance-config.

use crate::core::Provenance;

/// Result type alias for provenance-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Boxed error returned by value converters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A present, non-blank raw value could not be converted to the field's type.
    ///
    /// The message names the key and the source, not the raw value.
    #[error("Invalid value for '{key}' from {provenance}: {reason}")]
    Conversion {
        /// The key or variable name the raw value was read from
        key: String,
        /// The source that held the malformed value
        provenance: Provenance,
        /// Why the conversion failed
        reason: String,
    },

    /// A field was declared without one of its lookup keys or its converter.
    #[error("Field '{field}' is missing its {missing}")]
    MissingFieldMetadata {
        /// The field name
        field: String,
        /// Which piece of metadata is absent
        missing: &'static str,
    },

    /// The same field name was resolved twice within one resolution session.
    #[error("Field '{0}' was resolved more than once")]
    DuplicateField(String),

    /// A strategy was supplied for a field that is not being resolved.
    #[error("No field named '{0}' to apply a strategy to")]
    UnknownField(String),

    /// Failed to parse a properties file.
    #[error("Failed to parse properties at line {line}: {message}")]
    Parse {
        /// 1-based line number where the logical line started
        line: usize,
        /// What was wrong
        message: String,
    },

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn conversion(key: &str, provenance: Provenance, err: BoxError) -> Self {
        Self::Conversion {
            key: key.to_string(),
            provenance,
            reason: err.to_string(),
        }
    }
}
