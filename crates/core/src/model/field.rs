//! AcroForm field records.
//!
//! An [`AcroField`] is built up line by line while the object scanner walks
//! an indirect object. It stores *where* values live in the document buffer
//! (line indices), not the decoded values themselves, so a later rewriting
//! stage can patch them in place.

use indexmap::IndexMap;
use serde::Serialize;

/// Field flag bits (`/Ff`), PDF 32000-1 tables 221, 226, 228 and 230.
pub mod flags {
    pub const READ_ONLY: u32 = 1 << 0;
    pub const REQUIRED: u32 = 1 << 1;
    pub const NO_EXPORT: u32 = 1 << 2;
    pub const MULTILINE: u32 = 1 << 12;
    pub const PASSWORD: u32 = 1 << 13;
    pub const NO_TOGGLE_TO_OFF: u32 = 1 << 14;
    pub const RADIO: u32 = 1 << 15;
    pub const PUSH_BUTTON: u32 = 1 << 16;
    pub const COMBO: u32 = 1 << 17;
    pub const MULTI_SELECT: u32 = 1 << 21;
}

/// The kind of a form field, from its `/FT` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// `/FT /Tx`
    Text,
    /// `/FT /Btn` - checkboxes, radio buttons, push-buttons
    Button,
    /// `/FT /Ch` - combo and list boxes
    Choice,
    /// `/FT /Sig`
    Signature,
    /// Any other name, kept verbatim.
    Other(String),
}

impl FieldType {
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Tx" => Self::Text,
            "Btn" => Self::Button,
            "Ch" => Self::Choice,
            "Sig" => Self::Signature,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_pdf_name(&self) -> &str {
        match self {
            Self::Text => "Tx",
            Self::Button => "Btn",
            Self::Choice => "Ch",
            Self::Signature => "Sig",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_pdf_name())
    }
}

/// One interactive form field under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AcroField {
    /// Indirect object number.
    pub id: u32,
    pub field_type: Option<FieldType>,
    /// The field's own name segment, e.g. `Phone[0]`.
    pub name: String,
    /// Dot-joined ancestor path ending with `name`.
    pub full_name: String,
    /// Line holding the `/T` entry.
    pub name_line: Option<usize>,
    /// Line holding the `/V` value.
    pub current_value_line: Option<usize>,
    /// Line holding the `/DV` value.
    pub default_value_line: Option<usize>,
    /// Line holding the `/TU` tooltip.
    pub tooltip_line: Option<usize>,
    /// `/MaxLen`, 0 when unlimited.
    pub max_len: u32,
    pub flags: u32,
    /// Export value to display value, in file order.
    pub options: Option<IndexMap<String, String>>,
    pub top_index: Option<u32>,
    pub selecteds: Vec<u32>,
}

impl AcroField {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Name used as the registration key: `name` without a trailing `[n]`.
    pub fn key_name(&self) -> &str {
        strip_array_index(&self.name)
    }

    const fn has_flag(&self, bit: u32) -> bool {
        self.flags & bit != 0
    }

    fn is_type(&self, kind: &FieldType) -> bool {
        self.field_type.as_ref() == Some(kind)
    }

    pub const fn is_read_only(&self) -> bool {
        self.has_flag(flags::READ_ONLY)
    }

    pub const fn is_required(&self) -> bool {
        self.has_flag(flags::REQUIRED)
    }

    pub const fn is_no_export(&self) -> bool {
        self.has_flag(flags::NO_EXPORT)
    }

    pub const fn is_multiline(&self) -> bool {
        self.has_flag(flags::MULTILINE)
    }

    pub const fn is_password(&self) -> bool {
        self.has_flag(flags::PASSWORD)
    }

    pub const fn is_radio(&self) -> bool {
        self.has_flag(flags::RADIO)
    }

    /// A `Btn` field with the push-button flag; it carries no value.
    pub fn is_push_button(&self) -> bool {
        self.is_type(&FieldType::Button) && self.has_flag(flags::PUSH_BUTTON)
    }

    pub fn is_checkbox(&self) -> bool {
        self.is_type(&FieldType::Button) && !self.is_radio() && !self.is_push_button()
    }

    pub fn is_combo(&self) -> bool {
        self.is_type(&FieldType::Choice) && self.has_flag(flags::COMBO)
    }

    pub fn is_multi_select(&self) -> bool {
        self.is_type(&FieldType::Choice) && self.has_flag(flags::MULTI_SELECT)
    }

    /// Whether the field qualifies for the document's field mapping.
    ///
    /// Needs a type and a name, and must not be a push-button. Removal is
    /// tracked by the scanner, not the field.
    pub fn is_registrable(&self) -> bool {
        self.field_type.is_some() && !self.name.is_empty() && !self.is_push_button()
    }
}

/// Strip one trailing `[digits]` suffix, as used by array-indexed names.
pub fn strip_array_index(name: &str) -> &str {
    if let Some(stem) = name.strip_suffix(']')
        && let Some(open) = stem.rfind('[')
    {
        let digits = &stem[open + 1..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return &name[..open];
        }
    }
    name
}
