//! Codec modules for PDF string data.
//!
//! This module contains:
//! - `hex`: hex string decoding and PDF text-string decoding

pub mod hex;

// Re-export main functions for convenience
pub use hex::{decode as hexdecode, decode_text_string};
