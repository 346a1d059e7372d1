//! pdffields - AcroForm field and cross-reference extraction for PDF form filling.
//!
//! Works on a PDF split into physical lines. A single forward pass collects
//! form fields and info metadata; backward scans then locate the classical
//! `xref` table, the trailer and the `startxref` pointer, keeping exact byte
//! offsets for an incremental-update writer.

pub mod api;
pub mod codec;
pub mod document;
pub mod error;
pub mod model;
pub mod parser;

pub use api::{parse_bytes, parse_file};
pub use document::{FormDocument, PdfLines};
pub use error::{PdfError, Result};
pub use model::{AcroField, CrossReference, FieldType, MetaValue};
pub use parser::parse;
