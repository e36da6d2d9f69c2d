//! Streaming instruction fetch
//!
//! Reads one record at a time from any [`Read`] source: one opcode byte,
//! then exactly the operand bytes the table declares for it. Nothing past
//! the current record is ever consumed.

use std::io::{ErrorKind, Read};

use crate::error::{Result, SpecError};
use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// Upper bound on operand bytes for any opcode
pub const MAX_OPERAND_LEN: usize = 8;

/// A decoded instruction and the byte offset of its opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fetched {
    pub offset: u64,
    pub instruction: Instruction,
}

/// Sequential instruction reader over a binary stream
#[derive(Debug)]
pub struct InstructionReader<R> {
    inner: R,
    offset: u64,
    failed: bool,
}

impl<R: Read> InstructionReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes consumed so far
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Fetch and decode the next record.
    ///
    /// Returns `Ok(None)` on a clean end-of-stream, i.e. when no opcode
    /// byte is available.
    pub fn next_instruction(&mut self) -> Result<Option<Fetched>> {
        let mut opcode_byte = [0u8; 1];
        if read_full(&mut self.inner, &mut opcode_byte)? == 0 {
            return Ok(None);
        }
        let offset = self.offset;
        self.offset += 1;

        let opcode = Opcode::from_u8(opcode_byte[0]).ok_or(SpecError::UnknownOpcode {
            opcode: opcode_byte[0],
            offset,
        })?;

        let expected = opcode.operand_len();
        let mut buf = [0u8; MAX_OPERAND_LEN];
        let operands = &mut buf[..expected];
        let found = read_full(&mut self.inner, operands)?;
        self.offset += found as u64;
        if found < expected {
            return Err(SpecError::TruncatedStream {
                opcode: opcode.to_u8(),
                offset,
                expected,
                found,
            });
        }

        let instruction = Instruction::decode(opcode, operands).map_err(|source| {
            SpecError::InvalidOperand {
                offset,
                source: Box::new(source),
            }
        })?;

        Ok(Some(Fetched { offset, instruction }))
    }
}

impl<R: Read> Iterator for InstructionReader<R> {
    type Item = Result<Fetched>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_instruction() {
            Ok(fetched) => fetched.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the reader allows; a short count means end-of-stream
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
