//! Classical cross-reference table record.

use serde::Serialize;

/// One classical `xref` table plus the `startxref` anchor pointing at it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossReference {
    /// Buffer line holding the `xref` keyword.
    pub line: usize,
    /// Absolute byte offset of the text `xref`.
    pub start_pointer: usize,
    /// First object number of the subsection.
    pub first_object: u32,
    /// Number of entries retained (subsection size minus the free-list head).
    pub count: usize,
    entries: Vec<String>,
    /// Numeric payload following `startxref`.
    pub start_value: usize,
    /// Buffer line holding `start_value`.
    pub start_line: usize,
}

impl CrossReference {
    pub fn new(line: usize, start_pointer: usize) -> Self {
        Self {
            line,
            start_pointer,
            ..Self::default()
        }
    }

    pub(crate) fn push_entry(&mut self, raw: String) {
        self.entries.push(raw);
    }

    /// Raw text of entry `index` (zero-based, free-list head excluded).
    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Split entry `index` into `(offset, generation, in_use)`.
    ///
    /// Returns `None` when the entry is missing or not of the form
    /// `nnnnnnnnnn ggggg n|f`.
    pub fn parse_entry(&self, index: usize) -> Option<(usize, u16, bool)> {
        let mut parts = self.entry(index)?.split_ascii_whitespace();
        let offset = parts.next()?.parse().ok()?;
        let generation = parts.next()?.parse().ok()?;
        let in_use = match parts.next()? {
            "n" => true,
            "f" => false,
            _ => return None,
        };
        Some((offset, generation, in_use))
    }
}
