//! Error types for annotation document decoding.

use thiserror::Error;

/// Errors that can occur while decoding an annotation document.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error reading the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Required field is missing
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// Document structure is not the expected shape
    #[error("Invalid document: {message}")]
    InvalidDocument {
        /// Description of the structural problem
        message: String,
    },
}

impl FormatError {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid document error with a message.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}
