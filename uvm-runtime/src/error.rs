//! Runtime error types for the UVM

use thiserror::Error;
use uvm_spec::SpecError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Unknown opcode {opcode} at byte offset {offset}")]
    UnknownOpcode { opcode: u8, offset: u64 },

    #[error("Truncated stream: opcode {opcode} at byte offset {offset} needs {expected} operand bytes, found {found}")]
    TruncatedStream {
        opcode: u8,
        offset: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid operand at byte offset {offset}: {source}")]
    InvalidOperand {
        offset: u64,
        #[source]
        source: Box<SpecError>,
    },

    #[error("Memory out of bounds: address {address} (memory size {memory_size}) at byte offset {offset}")]
    OutOfBounds {
        address: u64,
        memory_size: usize,
        offset: u64,
    },

    #[error("Invalid dump range {start}..{end} for memory size {memory_size}")]
    InvalidDumpRange {
        start: usize,
        end: usize,
        memory_size: usize,
    },

    #[error("Malformed dump range `{0}`, expected lo..hi or lo:hi")]
    MalformedDumpRange(String),

    #[error("Spec error: {0}")]
    SpecError(SpecError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Result serialization error: {0}")]
    ResultError(#[from] serde_json::Error),
}

impl From<SpecError> for RuntimeError {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::UnknownOpcode { opcode, offset } => {
                RuntimeError::UnknownOpcode { opcode, offset }
            }
            SpecError::TruncatedStream {
                opcode,
                offset,
                expected,
                found,
            } => RuntimeError::TruncatedStream {
                opcode,
                offset,
                expected,
                found,
            },
            SpecError::InvalidOperand { offset, source } => {
                RuntimeError::InvalidOperand { offset, source }
            }
            SpecError::IoError(e) => RuntimeError::IoError(e),
            other => RuntimeError::SpecError(other),
        }
    }
}

impl RuntimeError {
    /// Byte offset of the faulting instruction, if the error came from one
    pub fn offset(&self) -> Option<u64> {
        match self {
            RuntimeError::UnknownOpcode { offset, .. }
            | RuntimeError::TruncatedStream { offset, .. }
            | RuntimeError::InvalidOperand { offset, .. }
            | RuntimeError::OutOfBounds { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
