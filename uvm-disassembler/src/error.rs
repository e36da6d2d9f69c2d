//! Disassembler errors

use thiserror::Error;
use uvm_spec::SpecError;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Decode error: {0}")]
    Decode(#[from] SpecError),
}

impl DisassemblerError {
    /// Byte offset of the record that failed to decode
    pub fn offset(&self) -> Option<u64> {
        match self {
            DisassemblerError::Decode(e) => e.offset(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
