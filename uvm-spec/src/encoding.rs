//! # Field Encoding Helpers
//!
//! All multi-byte fields are unsigned little-endian. Widths come from the
//! instruction set table; these helpers never consult it themselves.

use crate::opcode::Field;

/// Append the low `width` bytes of `value`, least significant first
#[inline]
pub fn write_le(out: &mut Vec<u8>, value: u64, width: usize) {
    out.extend_from_slice(&value.to_le_bytes()[..width]);
}

/// Read an unsigned little-endian integer spanning all of `bytes` (at most 8)
#[inline]
pub fn read_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64)
}

/// Check that a value fits its field
#[inline]
pub fn fits(field: &Field, value: u64) -> bool {
    value <= field.max_value()
}

/// Lowercase hex rendering of a byte slice, no separators
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}
