//! Error types for the envload system

use crate::diagnostics::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error raised by a content decoder
pub type DecodeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for loading an env file
#[derive(Error, Debug)]
pub enum LoadError {
    /// The resolved path could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its content is not well-formed structured text
    #[error("Failed to parse {} as {format}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        format: &'static str,
        #[source]
        source: DecodeError,
    },

    /// The structured value was rejected by the schema
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Result type alias for load operations
pub type Result<T> = std::result::Result<T, LoadError>;

impl LoadError {
    /// Whether the failure happened while reading the file
    pub fn is_read(&self) -> bool {
        matches!(self, LoadError::Read { .. })
    }

    /// Whether the failure happened while decoding the file's content
    pub fn is_parse(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }

    /// Whether the failure was raised by the schema
    pub fn is_validation(&self) -> bool {
        matches!(self, LoadError::Validation(_))
    }

    /// Structured diagnostics, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            LoadError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Underlying I/O error, if this is a read failure
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            LoadError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
