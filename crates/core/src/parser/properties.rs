//! Per-line field property dispatch.
//!
//! Every line of an indirect object goes through [`parse_line`]. Info
//! metadata and the `/Fields` NeedAppearances patch are checked on every
//! line; the field keys form an ordered chain in which the first matching
//! key handles the line.

use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

use super::names::{ObjectRegistry, resolve_name};
use super::options::parse_options;
use super::strings::{LITERAL_BODY, literal_text, parse_number};
use crate::codec::hex::{decode, decode_text_string};
use crate::document::FormDocument;
use crate::model::{AcroField, FieldType, MetaValue};

/// Info dictionary keys recorded as document metadata.
pub const INFO_KEYS: [&str; 8] = [
    "Title",
    "Author",
    "Subject",
    "Keywords",
    "Creator",
    "Producer",
    "CreationDate",
    "ModDate",
];

const NEED_APPEARANCES_PREFIX: &[u8] = b"/NeedAppearances true ";

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

struct InfoPatterns {
    key: &'static str,
    literal: Regex,
    hex: Regex,
}

static INFO: LazyLock<Vec<InfoPatterns>> = LazyLock::new(|| {
    INFO_KEYS
        .iter()
        .map(|&key| InfoPatterns {
            key,
            literal: regex(&format!(r"(?-u)/{key}\s*\(({LITERAL_BODY})\)")),
            hex: regex(&format!(r"(?-u)/{key}\s*<([0-9A-Fa-f\s]*)>")),
        })
        .collect()
});

static TRAPPED: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Trapped\s*/(\w+)"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| regex(&format!(r"(?-u)/T\s*\(({LITERAL_BODY})\)")));
static VALUE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/(V|DV|TU)\s*[<(/]"));
static MAX_LEN: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/MaxLen\s+(\d+)"));
static REMOVED: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/removed\s+true"));
static PARENT: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Parent\s+(\d+)"));
static FIELD_TYPE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/FT\s*/(\w+)"));
static FLAGS: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Ff\s+(\d+)"));
static OPTIONS: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/Opt\s*\[(.*)\]"));
static TOP_INDEX: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/TI\s*(\d+)"));
static SELECTED: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)/I\s*\[([\d\s]*)\]"));
static FIELDS: LazyLock<Regex> = LazyLock::new(|| regex(r"(?-u)^/Fields\b"));
static NEED_APPEARANCES: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?-u)/NeedAppearances\s+true"));

/// Per-object parse state, alive from `N M obj` to `endobj`.
#[derive(Debug)]
pub struct ObjectState {
    pub field: AcroField,
    /// Most recent `/Parent` id seen in this object.
    pub parent: Option<u32>,
    pub removed: bool,
}

impl ObjectState {
    pub fn new(id: u32) -> Self {
        Self {
            field: AcroField::new(id),
            parent: None,
            removed: false,
        }
    }
}

type Handler = fn(&Captures<'_>, usize, &mut ObjectState, &mut ObjectRegistry);

/// Field keys in evaluation order.
static FIELD_KEYS: LazyLock<[(&'static Regex, Handler); 10]> = LazyLock::new(|| {
    [
        (&*NAME, on_name as Handler),
        (&*VALUE, on_value as Handler),
        (&*MAX_LEN, on_max_len as Handler),
        (&*REMOVED, on_removed as Handler),
        (&*PARENT, on_parent as Handler),
        (&*FIELD_TYPE, on_field_type as Handler),
        (&*FLAGS, on_flags as Handler),
        (&*OPTIONS, on_options as Handler),
        (&*TOP_INDEX, on_top_index as Handler),
        (&*SELECTED, on_selected as Handler),
    ]
});

/// Parse one object line at buffer index `index`.
///
/// Returns whether the object may still be registered, i.e. no
/// `/removed true` has been seen on this or an earlier line.
pub fn parse_line<D: FormDocument + ?Sized>(
    doc: &mut D,
    index: usize,
    line: &[u8],
    state: &mut ObjectState,
    registry: &mut ObjectRegistry,
) -> bool {
    record_info(doc, line);

    for (pattern, handler) in FIELD_KEYS.iter() {
        if let Some(caps) = pattern.captures(line) {
            handler(&caps, index, state, registry);
            break;
        }
    }

    patch_need_appearances(doc, index, line);

    !state.removed
}

fn record_info<D: FormDocument + ?Sized>(doc: &mut D, line: &[u8]) {
    for info in INFO.iter() {
        if let Some(caps) = info.literal.captures(line) {
            doc.add_meta(info.key, MetaValue::Text(literal_text(&caps[1])));
        } else if let Some(caps) = info.hex.captures(line) {
            let bytes = decode(&caps[1]);
            doc.add_meta(info.key, MetaValue::Text(decode_text_string(&bytes)));
        }
    }
    if let Some(caps) = TRAPPED.captures(line) {
        let value = String::from_utf8_lossy(&caps[1]).to_lowercase();
        doc.add_meta("Trapped", MetaValue::Text(value));
    }
}

fn patch_need_appearances<D: FormDocument + ?Sized>(doc: &mut D, index: usize, line: &[u8]) {
    if NEED_APPEARANCES.is_match(line) {
        doc.set_need_appearances();
        return;
    }
    if FIELDS.is_match(line) && !doc.is_need_appearances_true() {
        let mut patched = Vec::with_capacity(NEED_APPEARANCES_PREFIX.len() + line.len());
        patched.extend_from_slice(NEED_APPEARANCES_PREFIX);
        patched.extend_from_slice(line);
        doc.set_entry(index, patched);
        doc.set_need_appearances();
    }
}

fn on_name(caps: &Captures<'_>, index: usize, state: &mut ObjectState, reg: &mut ObjectRegistry) {
    let name = literal_text(&caps[1]);
    resolve_name(&mut state.field, name, state.parent, reg);
    state.field.name_line = Some(index);
}

fn on_value(caps: &Captures<'_>, index: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    let slot = match &caps[1] {
        b"V" => &mut state.field.current_value_line,
        b"DV" => &mut state.field.default_value_line,
        _ => &mut state.field.tooltip_line,
    };
    *slot = Some(index);
}

fn on_max_len(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    if let Some(max_len) = parse_number(&caps[1]) {
        state.field.max_len = max_len;
    }
}

fn on_removed(_: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    state.removed = true;
}

fn on_parent(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    if let Some(parent) = parse_number(&caps[1]) {
        state.parent = Some(parent);
    }
}

fn on_field_type(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    let kind = String::from_utf8_lossy(&caps[1]);
    state.field.field_type = Some(FieldType::from_pdf_name(&kind));
}

fn on_flags(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    if let Some(flags) = parse_number(&caps[1]) {
        state.field.flags = flags;
    }
}

fn on_options(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    if let Some(options) = parse_options(&caps[1]) {
        state.field.options = Some(options);
    }
}

fn on_top_index(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    state.field.top_index = parse_number(&caps[1]);
}

fn on_selected(caps: &Captures<'_>, _: usize, state: &mut ObjectState, _: &mut ObjectRegistry) {
    state.field.selecteds = caps[1]
        .split(|b| b.is_ascii_whitespace())
        .filter_map(parse_number)
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PdfLines;

    fn run(lines: &[&str]) -> (PdfLines, ObjectState) {
        let mut doc = PdfLines::from_lines(lines.iter().copied());
        let mut state = ObjectState::new(7);
        let mut registry = ObjectRegistry::new();
        for (index, line) in lines.iter().enumerate() {
            parse_line(&mut doc, index, line.as_bytes(), &mut state, &mut registry);
        }
        (doc, state)
    }

    #[test]
    fn records_value_positions() {
        let (_, state) = run(&["/T (Phone)", "/V (555)", "/DV (000)", "/TU (Your phone)"]);
        assert_eq!(state.field.name_line, Some(0));
        assert_eq!(state.field.current_value_line, Some(1));
        assert_eq!(state.field.default_value_line, Some(2));
        assert_eq!(state.field.tooltip_line, Some(3));
    }

    #[test]
    fn value_needs_string_name_or_hex() {
        let (_, state) = run(&["/V 12 0 R"]);
        assert_eq!(state.field.current_value_line, None);
    }

    #[test]
    fn escaped_parentheses_in_name() {
        let (_, state) = run(&[r"/T (Total \(USD\))"]);
        assert_eq!(state.field.name, "Total (USD)");
    }

    #[test]
    fn utf16_name_keeps_low_control_bytes() {
        // U+0159 and U+03A9 carry 0x01 and 0x03 high bytes.
        let mut line = b"/T (".to_vec();
        line.extend_from_slice(&[0xFE, 0xFF, 0x00, 0x46, 0x01, 0x59, 0x03, 0xA9]);
        line.push(b')');
        let mut doc = PdfLines::from_bytes(&line);
        let mut state = ObjectState::new(1);
        let mut registry = ObjectRegistry::new();
        parse_line(&mut doc, 0, &line, &mut state, &mut registry);
        assert_eq!(state.field.name, "FřΩ");
        assert_eq!(state.field.name_line, Some(0));
    }

    #[test]
    fn scalar_properties() {
        let (_, state) = run(&[
            "/FT /Ch",
            "/Ff 131072",
            "/MaxLen 12",
            "/TI 2",
            "/I [0 3 ]",
            "/Opt [[(a)(Alpha)] [(b)]]",
        ]);
        assert_eq!(state.field.field_type, Some(FieldType::Choice));
        assert!(state.field.is_combo());
        assert_eq!(state.field.max_len, 12);
        assert_eq!(state.field.top_index, Some(2));
        assert_eq!(state.field.selecteds, vec![0, 3]);
        let options = state.field.options.unwrap();
        assert_eq!(options.get("a").map(String::as_str), Some("Alpha"));
        assert_eq!(options.get("b").map(String::as_str), Some("b"));
    }

    #[test]
    fn first_field_key_wins() {
        let (_, state) = run(&["/T (A) /FT /Tx"]);
        assert_eq!(state.field.name, "A");
        assert_eq!(state.field.field_type, None);
    }

    #[test]
    fn removed_reported_but_parsing_continues() {
        let mut doc = PdfLines::from_lines(["/removed true", "/FT /Tx"]);
        let mut state = ObjectState::new(1);
        let mut registry = ObjectRegistry::new();
        assert!(!parse_line(&mut doc, 0, b"/removed true", &mut state, &mut registry));
        assert!(!parse_line(&mut doc, 1, b"/FT /Tx", &mut state, &mut registry));
        assert_eq!(state.field.field_type, Some(FieldType::Text));
    }

    #[test]
    fn info_literal_and_hex() {
        let hex_title = hex::encode("Quarterly Report");
        let line = format!("<< /Author (J. Doe) /Title <{hex_title}> /Trapped /False >>");
        let (doc, _) = run(&[line.as_str()]);
        assert_eq!(doc.meta_value("Author"), Some(&MetaValue::from("J. Doe")));
        assert_eq!(
            doc.meta_value("Title"),
            Some(&MetaValue::from("Quarterly Report"))
        );
        assert_eq!(doc.meta_value("Trapped"), Some(&MetaValue::from("false")));
    }

    #[test]
    fn fields_line_patched_once() {
        let (doc, _) = run(&["/Fields [3 0 R]", "/Fields [4 0 R]"]);
        assert_eq!(doc.entry(0), b"/NeedAppearances true /Fields [3 0 R]");
        assert_eq!(doc.entry(1), b"/Fields [4 0 R]");
        assert!(doc.need_appearances());
    }

    #[test]
    fn existing_need_appearances_prevents_patch() {
        let (doc, _) = run(&["/NeedAppearances true", "/Fields [3 0 R]"]);
        assert_eq!(doc.entry(1), b"/Fields [3 0 R]");
    }
}
