//! Line-tokenized PDF document buffer.
//!
//! [`FormDocument`] is the contract the parser writes through; [`PdfLines`]
//! is the in-memory implementation shipped with the crate.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::{AcroField, CrossReference, MetaValue};

/// Document buffer the form parser reads lines from and records results into.
///
/// `entry` and `set_entry` follow slice indexing rules and panic when
/// `index >= entry_count()`.
pub trait FormDocument {
    fn entry_count(&self) -> usize;
    fn entry(&self, index: usize) -> &[u8];
    fn set_entry(&mut self, index: usize, line: Vec<u8>);

    fn add_meta(&mut self, key: &str, value: MetaValue);

    fn is_need_appearances_true(&self) -> bool;
    fn set_need_appearances(&mut self);

    fn set_field(&mut self, name: String, field: AcroField);

    /// Byte offset of object `object_id`'s header line.
    fn set_offset(&mut self, object_id: u32, offset: usize);
    /// Declaration-order position of object `object_id`.
    fn set_position(&mut self, object_id: u32, position: usize);
    /// Byte-length delta accumulated at `position` by later rewrites.
    fn set_shift(&mut self, position: usize, shift: i64);

    fn set_cross_reference(&mut self, xref: CrossReference);
    fn cross_reference_mut(&mut self) -> Option<&mut CrossReference>;
}

/// PDF bytes split into physical lines.
///
/// Lines are split on `\n` only and kept as raw bytes, so a `\r` before the
/// newline stays in the line and `to_bytes` reproduces the input exactly.
#[derive(Debug, Clone, Default)]
pub struct PdfLines {
    lines: Vec<Vec<u8>>,
    meta: IndexMap<String, MetaValue>,
    fields: IndexMap<String, AcroField>,
    offsets: HashMap<u32, usize>,
    positions: HashMap<u32, usize>,
    shifts: HashMap<usize, i64>,
    cross_reference: Option<CrossReference>,
    need_appearances: bool,
}

impl PdfLines {
    pub fn from_bytes(data: &[u8]) -> Self {
        let lines = data.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect();
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Join the (possibly patched) lines back into a byte stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&[u8]> {
        self.lines.get(index).map(Vec::as_slice)
    }

    pub const fn fields(&self) -> &IndexMap<String, AcroField> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&AcroField> {
        self.fields.get(name)
    }

    pub const fn meta(&self) -> &IndexMap<String, MetaValue> {
        &self.meta
    }

    pub fn meta_value(&self, key: &str) -> Option<&MetaValue> {
        self.meta.get(key)
    }

    pub fn offset(&self, object_id: u32) -> Option<usize> {
        self.offsets.get(&object_id).copied()
    }

    pub fn position(&self, object_id: u32) -> Option<usize> {
        self.positions.get(&object_id).copied()
    }

    pub fn shift(&self, position: usize) -> Option<i64> {
        self.shifts.get(&position).copied()
    }

    pub fn object_count(&self) -> usize {
        self.positions.len()
    }

    pub const fn cross_reference(&self) -> Option<&CrossReference> {
        self.cross_reference.as_ref()
    }

    pub const fn need_appearances(&self) -> bool {
        self.need_appearances
    }
}

impl FormDocument for PdfLines {
    fn entry_count(&self) -> usize {
        self.lines.len()
    }

    fn entry(&self, index: usize) -> &[u8] {
        &self.lines[index]
    }

    fn set_entry(&mut self, index: usize, line: Vec<u8>) {
        self.lines[index] = line;
    }

    fn add_meta(&mut self, key: &str, value: MetaValue) {
        self.meta.insert(key.to_string(), value);
    }

    fn is_need_appearances_true(&self) -> bool {
        self.need_appearances
    }

    fn set_need_appearances(&mut self) {
        self.need_appearances = true;
    }

    fn set_field(&mut self, name: String, field: AcroField) {
        self.fields.insert(name, field);
    }

    fn set_offset(&mut self, object_id: u32, offset: usize) {
        self.offsets.insert(object_id, offset);
    }

    fn set_position(&mut self, object_id: u32, position: usize) {
        self.positions.insert(object_id, position);
    }

    fn set_shift(&mut self, position: usize, shift: i64) {
        self.shifts.insert(position, shift);
    }

    fn set_cross_reference(&mut self, xref: CrossReference) {
        self.cross_reference = Some(xref);
    }

    fn cross_reference_mut(&mut self) -> Option<&mut CrossReference> {
        self.cross_reference.as_mut()
    }
}
