//! # Program Structure
//!
//! A program is an ordered list of instructions. Its binary form is the
//! plain concatenation of each instruction's record: no header, no padding,
//! no length prefix.

use crate::error::Result;
use crate::instruction::Instruction;
use crate::stream::InstructionReader;
use sha2::{Digest, Sha256};

/// Assembled program, immutable once built
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Size of the binary stream in bytes
    pub fn encoded_len(&self) -> usize {
        self.instructions
            .iter()
            .map(|i| i.opcode().encoded_len())
            .sum()
    }

    /// Serialize to the binary instruction stream
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        for instr in &self.instructions {
            instr.encode_into(&mut bytes);
        }
        bytes
    }

    /// Parse a complete binary instruction stream
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let instructions = InstructionReader::new(bytes)
            .map(|fetched| fetched.map(|f| f.instruction))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { instructions })
    }

    /// SHA-256 of the binary stream
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.to_bytes());
        hasher.finalize().into()
    }
}
