//! Assembly log records
//!
//! One record per emitted instruction, in source order, written as a JSON
//! array next to the binary.

use std::io::Write;

use serde::{Deserialize, Serialize};
use uvm_spec::encoding::to_hex;
use uvm_spec::Instruction;

use crate::error::Result;

/// Resolved form of one assembled instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Mnemonic
    pub command: String,
    /// Field values in encoding order
    pub args: Vec<u64>,
    /// Emitted bytes as lowercase hex
    pub binary: String,
}

impl LogRecord {
    pub fn new(instr: &Instruction, bytes: &[u8]) -> Self {
        Self {
            command: instr.mnemonic().to_string(),
            args: instr.fields(),
            binary: to_hex(bytes),
        }
    }
}

/// Serialize records as a pretty-printed JSON array.
///
/// The log is JSON rather than YAML; each record keeps the `command`, `args`,
/// `binary` fields in that order.
pub fn write_log<W: Write>(mut writer: W, records: &[LogRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
