//! # Error Types for the UVM instruction set

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    // Stream errors
    #[error("Unknown opcode {opcode} at byte offset {offset}")]
    UnknownOpcode { opcode: u8, offset: u64 },

    #[error("Truncated stream: opcode {opcode} at byte offset {offset} needs {expected} operand bytes, found {found}")]
    TruncatedStream {
        opcode: u8,
        offset: u64,
        expected: usize,
        found: usize,
    },

    // Operand errors
    #[error("Invalid register index: {0} (valid range: 0-255)")]
    InvalidRegister(u64),

    #[error("Value {value} does not fit {width}-byte field `{field}`")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        width: usize,
    },

    #[error("{mnemonic} has {expected} fields, got {found}")]
    FieldCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid operand at byte offset {offset}: {source}")]
    InvalidOperand {
        offset: u64,
        #[source]
        source: Box<SpecError>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpecError {
    /// Byte offset of the faulting opcode, for stream errors
    pub fn offset(&self) -> Option<u64> {
        match self {
            SpecError::UnknownOpcode { offset, .. }
            | SpecError::TruncatedStream { offset, .. }
            | SpecError::InvalidOperand { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;
