//! Byte offsets of document lines.

use crate::document::FormDocument;

/// Absolute byte offset of the first character of every line.
///
/// Each line is followed by exactly one separator byte, the `\n` removed
/// during tokenization.
pub fn line_offsets<D: FormDocument + ?Sized>(doc: &D) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(doc.entry_count());
    let mut next = 0;
    for index in 0..doc.entry_count() {
        offsets.push(next);
        next += doc.entry(index).len() + 1;
    }
    offsets
}
