//! Classical cross-reference table.

use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::debug;

use super::locate_keyword;
use super::strings::parse_number;
use crate::document::FormDocument;
use crate::error::{PdfError, Result};
use crate::model::CrossReference;

static XREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?-u)\bxref\b").expect("static regex"));
static SUBSECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^\s*(\d+)\s+(\d+)").expect("static regex"));
pub(crate) static TRAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^trailer").expect("static regex"));

/// Locate the last `xref` table and record its subsection entries.
///
/// The subsection header `start count` is followed by `count` entry lines;
/// the first (the free-list head) is skipped and the remaining `count - 1`
/// are stored verbatim. A `trailer` line or end of buffer before all entries
/// are read is reported as `Corrupted`.
pub fn parse_xref<D: FormDocument + ?Sized>(doc: &mut D, offsets: &[usize]) -> Result<()> {
    let line = locate_keyword(&*doc, &XREF, "xref")?;
    let keyword_at = XREF.find(doc.entry(line)).map_or(0, |m| m.start());
    let mut xref = CrossReference::new(line, offsets[line] + keyword_at);

    let header = doc.entry(line + 1);
    let caps = SUBSECTION.captures(header).ok_or_else(|| {
        PdfError::MalformedValue(format!(
            "xref subsection header: {:?}",
            String::from_utf8_lossy(header)
        ))
    })?;
    let first: u32 = parse_number(&caps[1])
        .ok_or_else(|| PdfError::MalformedValue("xref subsection start".into()))?;
    let declared: usize = parse_number(&caps[2])
        .ok_or_else(|| PdfError::MalformedValue("xref subsection count".into()))?;
    xref.first_object = first;
    xref.count = declared.saturating_sub(1);

    let count = doc.entry_count();
    let mut remaining = declared;
    let mut index = line + 2;
    while remaining > 0 {
        if index >= count {
            return Err(PdfError::Corrupted(format!(
                "xref table declares {declared} entries but the file ends after {}",
                declared - remaining
            )));
        }
        let entry = doc.entry(index);
        if TRAILER.is_match(entry) {
            return Err(PdfError::Corrupted(format!(
                "xref table declares {declared} entries but trailer follows after {}",
                declared - remaining
            )));
        }
        if remaining < declared {
            xref.push_entry(String::from_utf8_lossy(entry).into_owned());
        }
        remaining -= 1;
        index += 1;
    }

    debug!(
        line,
        start_pointer = xref.start_pointer,
        entries = xref.count,
        "parsed xref table"
    );
    doc.set_cross_reference(xref);
    Ok(())
}
