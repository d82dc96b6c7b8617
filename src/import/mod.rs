//! Import functionality
//!
//! Provides the DMN XML parser that reads documents into the interchange
//! model.

pub mod dmn;

/// Error during import
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("DMN parse error: {0}")]
    DMNParseError(String),
    #[error("DMN validation error: {0}")]
    DMNValidationError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::IoError(err.to_string())
    }
}

// Re-export for convenience
pub use dmn::DMNImporter;
