//! Choice-field `/Opt` arrays.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::bytes::Regex;
use tracing::warn;

use super::strings::{LITERAL_BODY, literal_text};

static SUB_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?-u)\[((?:[^\[\]()\\]|\({LITERAL_BODY}\))*)\]")).expect("static regex")
});
static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?-u)^\s*\(({LITERAL_BODY})\)\s*\(({LITERAL_BODY})\)\s*$"
    ))
    .expect("static regex")
});
static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?-u)^\s*\(({LITERAL_BODY})\)\s*$")).expect("static regex")
});

/// Parse the interior of `/Opt [ ... ]`.
///
/// `[(export)(display)]` maps export to display, `[(value)]` maps value to
/// itself, and any other sub-array is skipped. Returns `None` when nothing
/// usable was found.
pub fn parse_options(interior: &[u8]) -> Option<IndexMap<String, String>> {
    let mut options = IndexMap::new();
    for caps in SUB_ARRAY.captures_iter(interior) {
        let body = &caps[1];
        if let Some(pair) = PAIR.captures(body) {
            options.insert(literal_text(&pair[1]), literal_text(&pair[2]));
        } else if let Some(single) = SINGLE.captures(body) {
            let value = literal_text(&single[1]);
            options.insert(value.clone(), value);
        } else {
            warn!(
                entry = %String::from_utf8_lossy(body),
                "skipping unrecognized /Opt entry"
            );
        }
    }
    (!options.is_empty()).then_some(options)
}
