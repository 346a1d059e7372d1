//! Document metadata values.

use serde::Serialize;

/// A value recorded in the document's metadata map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Decoded info-dictionary string, `Trapped`, or `checksum`.
    Text(String),
    /// Trailer `/Size`.
    Int(u64),
    /// Trailer `/ID` hex pair, kept as hex text.
    Pair(String, String),
    /// Trailer `/Root` or `/Info` as object and generation numbers.
    Reference(u32, u32),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            Self::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
