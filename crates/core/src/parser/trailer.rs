//! Trailer dictionary: `/Size`, `/ID`, `/DocChecksum`, `/Root`, `/Info`.

use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::debug;

use super::locate_keyword;
use super::startxref::STARTXREF;
use super::strings::parse_number;
use super::xref::TRAILER;
use crate::document::FormDocument;
use crate::error::{PdfError, Result};
use crate::model::MetaValue;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

static SIZE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Size\s+(\d+)"));
static ROOT: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Root\s+(\d+)\s+(\d+)\s+R"));
static INFO: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Info\s+(\d+)\s+(\d+)\s+R"));
static CHECKSUM: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?-u)/DocChecksum\s*/([0-9A-Fa-f]+)"));
static ID_OPEN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?-u)/ID\s*\[\s*<([0-9A-Fa-f]*)(>)?"));
static ID_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?-u)/ID\s*\[\s*<([0-9A-Fa-f]*)>\s*<([0-9A-Fa-f]*)>")
});
static ID_FIRST_TAIL: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?-u)^\s*([0-9A-Fa-f]*)>(?:\s*<([0-9A-Fa-f]*)>)?"));
static ID_SECOND: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)^\s*<([0-9A-Fa-f]*)>"));

#[derive(Debug)]
enum IdState {
    Idle,
    /// First hex string opened but not closed on its line.
    AwaitingFirstTail(String),
    /// First hex string closed; the next line must open and close the second.
    AwaitingSecondChunk(String),
}

fn hex_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Record trailer entries from the last `trailer` up to `startxref`.
///
/// `/ID` may be split over lines. The line after an unclosed first hex
/// string must close it; the line after a closed first hex string must
/// carry `<hex2>`. Otherwise the trailer is reported as `Corrupted`. A line
/// that completes the ID is still checked for the other trailer keys.
pub fn parse_trailer<D: FormDocument + ?Sized>(doc: &mut D) -> Result<()> {
    let start = locate_keyword(&*doc, &TRAILER, "trailer")?;
    let mut state = IdState::Idle;

    for index in start..doc.entry_count() {
        let line = doc.entry(index).to_vec();
        if index > start && STARTXREF.is_match(&line) {
            break;
        }

        let continuation = match std::mem::replace(&mut state, IdState::Idle) {
            IdState::Idle => false,
            IdState::AwaitingFirstTail(mut first) => {
                let caps = ID_FIRST_TAIL.captures(&line).ok_or_else(|| {
                    PdfError::Corrupted(format!(
                        "trailer /ID first hex string not closed on line {index}"
                    ))
                })?;
                first.push_str(&hex_text(&caps[1]));
                match caps.get(2) {
                    Some(second) => {
                        doc.add_meta("ID", MetaValue::Pair(first, hex_text(second.as_bytes())));
                    }
                    None => state = IdState::AwaitingSecondChunk(first),
                }
                true
            }
            IdState::AwaitingSecondChunk(first) => {
                let caps = ID_SECOND.captures(&line).ok_or_else(|| {
                    PdfError::Corrupted(format!(
                        "trailer /ID second hex string missing on line {index}"
                    ))
                })?;
                doc.add_meta("ID", MetaValue::Pair(first, hex_text(&caps[1])));
                true
            }
        };

        if let Some(caps) = SIZE.captures(&line)
            && let Some(size) = parse_number(&caps[1])
        {
            doc.add_meta("size", MetaValue::Int(size));
        }
        if let Some(reference) = reference(&ROOT, &line) {
            doc.add_meta("root", reference);
        }
        if let Some(reference) = reference(&INFO, &line) {
            doc.add_meta("info", reference);
        }
        if !continuation {
            if let Some(caps) = ID_PAIR.captures(&line) {
                doc.add_meta("ID", MetaValue::Pair(hex_text(&caps[1]), hex_text(&caps[2])));
            } else if let Some(caps) = ID_OPEN.captures(&line) {
                let first = hex_text(&caps[1]);
                state = if caps.get(2).is_some() {
                    IdState::AwaitingSecondChunk(first)
                } else {
                    IdState::AwaitingFirstTail(first)
                };
            }
        }
        if let Some(caps) = CHECKSUM.captures(&line) {
            doc.add_meta("checksum", MetaValue::Text(hex_text(&caps[1])));
        }
    }

    if !matches!(state, IdState::Idle) {
        return Err(PdfError::Corrupted(
            "trailer ends before the /ID value is complete".into(),
        ));
    }
    debug!(line = start, "parsed trailer");
    Ok(())
}

fn reference(pattern: &Regex, line: &[u8]) -> Option<MetaValue> {
    let caps = pattern.captures(line)?;
    Some(MetaValue::Reference(
        parse_number(&caps[1])?,
        parse_number(&caps[2])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PdfLines;

    fn run(lines: &[&str]) -> Result<PdfLines> {
        let mut doc = PdfLines::from_lines(lines.iter().copied());
        parse_trailer(&mut doc)?;
        Ok(doc)
    }

    #[test]
    fn single_line_trailer() {
        let doc = run(&[
            "trailer",
            "<< /Size 12 /Root 1 0 R /Info 2 0 R /ID [<AABB><CCDD>] /DocChecksum /0F1E >>",
            "startxref",
            "400",
        ])
        .unwrap();
        assert_eq!(doc.meta_value("size"), Some(&MetaValue::Int(12)));
        assert_eq!(doc.meta_value("root"), Some(&MetaValue::Reference(1, 0)));
        assert_eq!(doc.meta_value("info"), Some(&MetaValue::Reference(2, 0)));
        assert_eq!(
            doc.meta_value("ID"),
            Some(&MetaValue::Pair("AABB".into(), "CCDD".into()))
        );
        assert_eq!(doc.meta_value("checksum"), Some(&MetaValue::from("0F1E")));
    }

    #[test]
    fn missing_second_chunk_is_corrupted() {
        let err = run(&["trailer", "<< /ID [<AABB>", "/Size 3 >>", "startxref", "0"]).unwrap_err();
        assert!(matches!(err, PdfError::Corrupted(_)));
    }

    #[test]
    fn keys_after_split_id_are_recorded() {
        let doc = run(&[
            "trailer",
            "<< /ID [<AABB>",
            "<CCDD>] /Size 5 /Root 1 0 R >>",
            "startxref",
            "0",
        ])
        .unwrap();
        assert_eq!(
            doc.meta_value("ID"),
            Some(&MetaValue::Pair("AABB".into(), "CCDD".into()))
        );
        assert_eq!(doc.meta_value("size"), Some(&MetaValue::Int(5)));
        assert_eq!(doc.meta_value("root"), Some(&MetaValue::Reference(1, 0)));
    }

    #[test]
    fn first_chunk_split_across_lines() {
        let doc = run(&["trailer", "<< /Size 2 /ID [<AABB", "CCDD><1122>] >>", "startxref", "0"])
            .unwrap();
        assert_eq!(
            doc.meta_value("ID"),
            Some(&MetaValue::Pair("AABBCCDD".into(), "1122".into()))
        );
    }

    #[test]
    fn closed_first_chunk_needs_opening_bracket() {
        let err = run(&["trailer", "<< /ID [<AABB>", "CCDD>] >>", "startxref", "0"]).unwrap_err();
        assert!(matches!(err, PdfError::Corrupted(_)));
    }

    #[test]
    fn unterminated_id_is_corrupted() {
        let err = run(&["trailer", "<< /ID [<AABB>"]).unwrap_err();
        assert!(matches!(err, PdfError::Corrupted(_)));
    }

    #[test]
    fn no_trailer() {
        let err = run(&["xref", "0 1"]).unwrap_err();
        assert!(matches!(err, PdfError::StructureNotFound("trailer")));
    }
}
