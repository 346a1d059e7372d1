//! The `startxref` pointer.

use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::debug;

use super::locate_keyword;
use super::strings::parse_number;
use crate::document::FormDocument;
use crate::error::{PdfError, Result};
use crate::model::CrossReference;

pub(crate) static STARTXREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^startxref").expect("static regex"));
static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^(\d+)").expect("static regex"));

/// Read the integer after the last `startxref` into the cross-reference.
///
/// The payload line must start with digits, otherwise `MalformedValue`.
pub fn parse_startxref<D: FormDocument + ?Sized>(doc: &mut D) -> Result<()> {
    let keyword = locate_keyword(&*doc, &STARTXREF, "startxref")?;
    let start_line = keyword + 1;
    let payload = doc.entry(start_line);
    let start_value: usize = LEADING_INT
        .captures(payload)
        .and_then(|caps| parse_number(&caps[1]))
        .ok_or_else(|| {
            PdfError::MalformedValue(format!(
                "startxref payload {:?}",
                String::from_utf8_lossy(payload)
            ))
        })?;

    match doc.cross_reference_mut() {
        Some(xref) => {
            xref.start_value = start_value;
            xref.start_line = start_line;
        }
        None => {
            let mut xref = CrossReference::default();
            xref.start_value = start_value;
            xref.start_line = start_line;
            doc.set_cross_reference(xref);
        }
    }
    debug!(start_value, start_line, "parsed startxref");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PdfLines;

    #[test]
    fn reads_payload_line() {
        let mut doc = PdfLines::from_lines(["trailer", "<< >>", "startxref", "1234", "%%EOF"]);
        doc.set_cross_reference(CrossReference::new(0, 0));
        parse_startxref(&mut doc).unwrap();
        let xref = doc.cross_reference().unwrap();
        assert_eq!(xref.start_value, 1234);
        assert_eq!(xref.start_line, 3);
    }

    #[test]
    fn creates_record_when_missing() {
        let mut doc = PdfLines::from_lines(["startxref", "99"]);
        parse_startxref(&mut doc).unwrap();
        assert_eq!(doc.cross_reference().unwrap().start_value, 99);
    }

    #[test]
    fn non_numeric_payload() {
        let mut doc = PdfLines::from_lines(["startxref", "%%EOF"]);
        let err = parse_startxref(&mut doc).unwrap_err();
        assert!(matches!(err, PdfError::MalformedValue(_)));
    }

    #[test]
    fn keyword_on_last_line() {
        let mut doc = PdfLines::from_lines(["%%EOF", "startxref"]);
        let err = parse_startxref(&mut doc).unwrap_err();
        assert!(matches!(err, PdfError::Corrupted(_)));
    }
}
