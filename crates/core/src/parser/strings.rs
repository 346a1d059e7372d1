//! Helpers for PDF literal strings inside single lines.
//!
//! Patterns that capture a `(...)` literal build on [`LITERAL_BODY`], which
//! steps over escaped bytes so `\)` does not end the match. The captured
//! span is raw; [`literal_text`] removes the escapes and decodes the text.

use std::str::FromStr;

use crate::codec::hex::decode_text_string;

/// Body of a literal string without its delimiters: unescaped bytes other
/// than parentheses and backslash, or a backslash followed by any byte.
pub const LITERAL_BODY: &str = r"(?:[^()\\]|\\(?s:.))*";

/// Remove `\\`, `\(` and `\)` escapes from a raw literal span.
///
/// Other escape sequences are kept as written, backslash included.
pub fn unescape_literal(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(c @ (b'\\' | b'(' | b')')) => out.push(c),
            Some(c) => out.extend_from_slice(&[b'\\', c]),
            None => out.push(b'\\'),
        }
    }
    out
}

/// Unescape a captured literal and decode it as a PDF text string.
pub fn literal_text(raw: &[u8]) -> String {
    decode_text_string(&unescape_literal(raw))
}

/// Parse ASCII digits captured by a pattern.
pub fn parse_number<T: FromStr>(digits: &[u8]) -> Option<T> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::bytes::Regex;

    fn literal() -> Regex {
        Regex::new(&format!(r"(?-u)\(({LITERAL_BODY})\)")).unwrap()
    }

    #[test]
    fn escaped_parens_stay_inside_match() {
        let line = br"/T (a\(b\)c\\) rest";
        let caps = literal().captures(line).unwrap();
        assert_eq!(&caps[1], br"a\(b\)c\\");
        assert_eq!(unescape_literal(&caps[1]), br"a(b)c\");
    }

    #[test]
    fn other_escapes_untouched() {
        assert_eq!(unescape_literal(br"a\nb"), br"a\nb".to_vec());
        assert_eq!(unescape_literal(br"trailing\"), br"trailing\".to_vec());
    }

    #[test]
    fn utf16_control_range_bytes_survive() {
        // "Fř Ω": 0x01 and 0x03 high bytes must not be rewritten.
        let raw = [0xFE, 0xFF, 0x00, 0x46, 0x01, 0x59, 0x00, 0x20, 0x03, 0xA9];
        assert_eq!(literal_text(&raw), "Fř Ω");
    }

    #[test]
    fn parse_number_rejects_overflow() {
        assert_eq!(parse_number::<u32>(b"42"), Some(42));
        assert_eq!(parse_number::<u32>(b"99999999999"), None);
    }
}
