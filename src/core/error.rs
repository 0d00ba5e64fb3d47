//! Error types for the logger hierarchy

use super::mask::MASK_BITS;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Logger names must be non-empty
    #[error("Invalid logger name '{name}': {message}")]
    InvalidName { name: String, message: String },

    /// Every identity bit has been handed out
    #[error("Appender mask space exhausted: cannot register '{name}', all {} bits in use", MASK_BITS)]
    MaskExhausted { name: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// A message or field could not be rendered
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid logger name error
    pub fn invalid_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a mask exhaustion error
    pub fn mask_exhausted(name: impl Into<String>) -> Self {
        LoggerError::MaskExhausted { name: name.into() }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}
