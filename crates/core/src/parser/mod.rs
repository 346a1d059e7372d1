//! Structural form parser over a line-tokenized PDF.
//!
//! - `offsets`: byte offset of every line
//! - `objects`: forward scan of `N M obj ... endobj` blocks
//! - `properties`: per-line field key dispatch
//! - `names`: fully-qualified names from `/Parent` links
//! - `options`: choice-field `/Opt` arrays
//! - `xref`, `trailer`, `startxref`: backward scans for the structural anchors
//! - `strings`: escape protection and number helpers shared by the above

pub mod names;
pub mod objects;
pub mod offsets;
pub mod options;
pub mod properties;
pub mod startxref;
pub mod strings;
pub mod trailer;
pub mod xref;

use regex::bytes::Regex;
use tracing::debug;

use crate::document::FormDocument;
use crate::error::{PdfError, Result};

// Re-export main functions for convenience
pub use objects::scan_objects;
pub use offsets::line_offsets;
pub use startxref::parse_startxref;
pub use trailer::parse_trailer;
pub use xref::parse_xref;

/// Parse form fields, metadata and the xref/trailer/startxref anchors.
///
/// The scans run in a fixed order: objects, xref, trailer, startxref. An
/// error aborts the parse without undoing buffer changes already made (the
/// `/Fields` NeedAppearances patch), so a failed document should be dropped.
pub fn parse<D: FormDocument + ?Sized>(doc: &mut D) -> Result<()> {
    let offsets = line_offsets(&*doc);
    let objects = scan_objects(doc, &offsets);
    debug!(lines = offsets.len(), objects, "object scan complete");

    parse_xref(doc, &offsets)?;
    parse_trailer(doc)?;
    parse_startxref(doc)?;
    Ok(())
}

/// Index of the last line matching `pattern`.
///
/// Fails with `StructureNotFound` when no line matches, and with `Corrupted`
/// when the match is the final line and nothing can follow it.
pub(crate) fn locate_keyword<D: FormDocument + ?Sized>(
    doc: &D,
    pattern: &Regex,
    keyword: &'static str,
) -> Result<usize> {
    let count = doc.entry_count();
    let index = (0..count)
        .rev()
        .find(|&i| pattern.is_match(doc.entry(i)))
        .ok_or(PdfError::StructureNotFound(keyword))?;
    if index + 1 == count {
        return Err(PdfError::Corrupted(format!(
            "{keyword} keyword is on the last line"
        )));
    }
    debug!(keyword, line = index, "located keyword");
    Ok(index)
}
