//! Hex string decoding for PDF `<...>` strings.
//!
//! Whitespace is ignored, decoding stops at the first `>`, and an odd
//! trailing nibble is padded with zero as PDF 32000-1 §7.3.4.3 requires.

/// Decode a hex-digit string to raw bytes.
///
/// Non-hex characters other than the terminating `>` are skipped.
pub fn decode(data: &[u8]) -> Vec<u8> {
    let data = data.strip_prefix(b"<").unwrap_or(data);
    let mut result = Vec::with_capacity(data.len() / 2);
    let mut pending: Option<u8> = None;

    for &byte in data {
        if byte == b'>' {
            break;
        }
        if let Some(nibble) = hex_nibble(byte) {
            if let Some(high) = pending.take() {
                result.push((high << 4) | nibble);
            } else {
                pending = Some(nibble);
            }
        }
    }

    if let Some(high) = pending {
        result.push(high << 4);
    }

    result
}

/// Decode the bytes of a PDF text string into a Rust `String`.
///
/// Strings starting with the `FE FF` byte order mark are UTF-16BE; anything
/// else is treated as PDFDocEncoding, whose printable range matches Latin-1.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks(2)
            .map(|pair| {
                let high = pair[0] as u16;
                let low = pair.get(1).copied().unwrap_or(0) as u16;
                (high << 8) | low
            })
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

const fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
