//! Error types for the object-graph layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf and tree-shape failures and converts them to [`FormError`].

use pdfform_core::FormError;
use thiserror::Error;

/// Error type for document loading, field-tree walking and serialization.
///
/// Converts to [`FormError`] for unified error handling across the library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The field tree is cyclic or too deep.
    #[error("malformed field tree: {0}")]
    Structure(String),

    /// Error writing the document back to bytes.
    #[error("failed to serialize PDF: {0}")]
    Serialize(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] FormError),
}

impl From<BackendError> for FormError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => FormError::ParseError(msg),
            BackendError::Io(e) => FormError::IoError(e.to_string()),
            BackendError::Structure(msg) => FormError::StructureError(msg),
            BackendError::Serialize(msg) => FormError::SerializationError(msg),
            BackendError::Core(e) => e,
        }
    }
}
