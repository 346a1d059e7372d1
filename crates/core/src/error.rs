//! Error types for pdffields form parsing.

use thiserror::Error;

/// Primary error type for form and structure parsing.
///
/// Every variant is terminal: a parse that returns an error leaves the
/// document buffer in whatever state it reached and should be discarded.
#[derive(Error, Debug)]
pub enum PdfError {
    /// A required structural keyword (`xref`, `trailer`, `startxref`) is absent.
    #[error("structure not found: {0}")]
    StructureNotFound(&'static str),

    /// A keyword is present but the surrounding structure is inconsistent.
    #[error("corrupted PDF: {0}")]
    Corrupted(String),

    /// A value expected to be numeric (or otherwise well-formed) is not.
    #[error("malformed value: {0}")]
    MalformedValue(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for PdfError.
pub type Result<T> = std::result::Result<T, PdfError>;
