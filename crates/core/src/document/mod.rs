//! PDF document buffer.
//!
//! This module contains:
//! - `lines` - the FormDocument contract and the PdfLines line buffer

pub mod lines;

// Re-export main types for convenience
pub use lines::{FormDocument, PdfLines};
