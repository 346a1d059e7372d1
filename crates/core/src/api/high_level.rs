//! High-level form extraction API.
//!
//! - `parse_bytes()` - tokenize PDF bytes and run the structural parser
//! - `parse_file()` - same, reading the file through a memory map

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::document::PdfLines;
use crate::error::Result;
use crate::parser::parse;

/// Tokenize `data` into lines and parse form fields and structure.
pub fn parse_bytes(data: &[u8]) -> Result<PdfLines> {
    let mut doc = PdfLines::from_bytes(data);
    parse(&mut doc)?;
    Ok(doc)
}

/// Parse the PDF at `path`.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PdfLines> {
    let file = File::open(path)?;
    // Safety: the map is only read while `file` is open and is dropped
    // before this function returns.
    let mmap = unsafe { Mmap::map(&file) }?;
    parse_bytes(&mmap)
}
