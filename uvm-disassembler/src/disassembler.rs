//! Main disassembler logic

use std::fmt::Write;

use uvm_spec::encoding::to_hex;

use crate::decoder::decode;
use crate::error::Result;
use crate::formatter::format;

/// Disassemble a binary stream into assembly text.
///
/// Each line carries the instruction text followed by a comment with its
/// byte offset and encoded bytes, so the listing assembles back to the same
/// stream.
pub fn disassemble(bytes: &[u8]) -> Result<String> {
    let fetched = decode(bytes)?;
    let mut output = String::new();

    output.push_str("# UVM Disassembly\n");
    let _ = writeln!(
        output,
        "# {} bytes ({} instructions)",
        bytes.len(),
        fetched.len()
    );
    output.push('\n');

    for (i, item) in fetched.iter().enumerate() {
        let start = item.offset as usize;
        let end = fetched
            .get(i + 1)
            .map_or(bytes.len(), |next| next.offset as usize);
        let _ = writeln!(
            output,
            "{:<32}# 0x{:04X}: {}",
            format(&item.instruction),
            item.offset,
            to_hex(&bytes[start..end])
        );
    }

    Ok(output)
}
