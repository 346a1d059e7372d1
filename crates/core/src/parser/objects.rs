//! Forward scan over indirect objects.

use std::sync::LazyLock;

use regex::bytes::Regex;
use tracing::{trace, warn};

use super::names::ObjectRegistry;
use super::properties::{ObjectState, parse_line};
use super::strings::parse_number;
use crate::document::FormDocument;

static OBJECT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^(\d+) (\d+) obj").expect("static regex"));
static END_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\bendobj\b").expect("static regex"));

/// Walk every `N M obj ... endobj` block once, registering form fields.
///
/// `offsets` must come from [`super::offsets::line_offsets`] over the same
/// buffer. Each object gets its byte offset, a declaration-order position
/// starting at 0, and a zero shift. Returns the number of objects seen.
pub fn scan_objects<D: FormDocument + ?Sized>(doc: &mut D, offsets: &[usize]) -> usize {
    let mut registry = ObjectRegistry::new();
    let count = doc.entry_count();
    let mut position = 0;
    let mut cursor = 0;

    while cursor < count {
        let Some(id) = object_id(doc.entry(cursor)) else {
            cursor += 1;
            continue;
        };

        doc.set_offset(id, offsets[cursor]);
        doc.set_position(id, position);
        doc.set_shift(position, 0);
        position += 1;

        let header = cursor;
        let mut state = ObjectState::new(id);
        let mut terminated = false;
        let mut index = header;
        while index < count {
            let line = doc.entry(index).to_vec();
            let closes = END_OBJECT.is_match(&line);
            if !closes || index == header {
                parse_line(doc, index, &line, &mut state, &mut registry);
            }
            if closes {
                terminated = true;
                break;
            }
            index += 1;
        }

        if terminated {
            register(doc, state);
        } else {
            warn!(object = id, line = header, "object has no endobj; not registered");
        }
        cursor = index + 1;
    }

    position
}

fn object_id(line: &[u8]) -> Option<u32> {
    let caps = OBJECT_HEADER.captures(line)?;
    parse_number(&caps[1])
}

fn register<D: FormDocument + ?Sized>(doc: &mut D, state: ObjectState) {
    let ObjectState { field, removed, .. } = state;
    if removed || !field.is_registrable() {
        return;
    }
    let key = field.key_name().to_string();
    trace!(object = field.id, name = %field.full_name, key = %key, "registering field");
    doc.set_field(key, field);
}
