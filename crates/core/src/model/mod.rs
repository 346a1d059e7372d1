//! Form data model types.
//!
//! This module contains:
//! - `field` - AcroForm field records (AcroField, FieldType)
//! - `xref` - classical cross-reference table record (CrossReference)
//! - `meta` - document metadata values (MetaValue)

pub mod field;
pub mod meta;
pub mod xref;

// Re-export main types for convenience
pub use field::{AcroField, FieldType};
pub use meta::MetaValue;
pub use xref::CrossReference;
