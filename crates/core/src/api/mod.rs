//! High-level API module for form extraction.
//!
//! # Example
//!
//! ```ignore
//! use pdffields_core::api::parse_file;
//!
//! let doc = parse_file("form.pdf")?;
//! for (name, field) in doc.fields() {
//!     println!("{name}: {}", field.full_name);
//! }
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{parse_bytes, parse_file};
