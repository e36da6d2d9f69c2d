//! UVM Instruction Set
//!
//! One variant per opcode. Field order in each variant follows the binary
//! layout declared in [`crate::opcode`], so `fields()` and `from_fields()`
//! are the only places that map between the two.

use crate::encoding::{fits, read_le, write_le};
use crate::error::{Result, SpecError};
use crate::opcode::{FieldKind, Opcode};
use crate::register::Register;
use serde::{Deserialize, Serialize};

/// UVM Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// LOAD_CONST: reg = value
    LoadConst { reg: Register, value: u32 },

    /// READ_MEM: dest = mem[base + offset]
    ReadMem { offset: u16, base: Register, dest: Register },

    /// WRITE_MEM: mem[base + offset] = src
    WriteMem { offset: u16, base: Register, src: Register },

    /// EQUAL: dest = (lhs == rhs) ? 1 : 0
    Equal { dest: Register, lhs: Register, rhs: Register },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::LoadConst { .. } => Opcode::LoadConst,
            Instruction::ReadMem { .. } => Opcode::ReadMem,
            Instruction::WriteMem { .. } => Opcode::WriteMem,
            Instruction::Equal { .. } => Opcode::Equal,
        }
    }

    #[inline]
    pub fn mnemonic(&self) -> &'static str {
        self.opcode().mnemonic()
    }

    /// Field values in encoding order
    pub fn fields(&self) -> Vec<u64> {
        match *self {
            Instruction::LoadConst { reg, value } => vec![reg.index() as u64, value as u64],
            Instruction::ReadMem { offset, base, dest } => {
                vec![offset as u64, base.index() as u64, dest.index() as u64]
            }
            Instruction::WriteMem { offset, base, src } => {
                vec![offset as u64, base.index() as u64, src.index() as u64]
            }
            Instruction::Equal { dest, lhs, rhs } => {
                vec![dest.index() as u64, lhs.index() as u64, rhs.index() as u64]
            }
        }
    }

    /// Build an instruction from field values in encoding order.
    ///
    /// Every value is checked against the table: register fields must name
    /// one of the 256 registers, every field must fit its declared width.
    pub fn from_fields(opcode: Opcode, values: &[u64]) -> Result<Self> {
        let spec = opcode.spec();
        if values.len() != spec.fields.len() {
            return Err(SpecError::FieldCount {
                mnemonic: spec.mnemonic,
                expected: spec.fields.len(),
                found: values.len(),
            });
        }

        for (field, &value) in spec.fields.iter().zip(values) {
            if field.kind == FieldKind::Register && u8::try_from(value).is_err() {
                return Err(SpecError::InvalidRegister(value));
            }
            if !fits(field, value) {
                return Err(SpecError::FieldOverflow {
                    field: field.name,
                    value,
                    width: field.width,
                });
            }
        }

        let reg = |i: usize| Register::new(values[i] as u8);
        Ok(match opcode {
            Opcode::LoadConst => Instruction::LoadConst {
                reg: reg(0),
                value: values[1] as u32,
            },
            Opcode::ReadMem => Instruction::ReadMem {
                offset: values[0] as u16,
                base: reg(1),
                dest: reg(2),
            },
            Opcode::WriteMem => Instruction::WriteMem {
                offset: values[0] as u16,
                base: reg(1),
                src: reg(2),
            },
            Opcode::Equal => Instruction::Equal {
                dest: reg(0),
                lhs: reg(1),
                rhs: reg(2),
            },
        })
    }

    /// Append the encoded record (opcode byte + fields) to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let opcode = self.opcode();
        out.push(opcode.to_u8());
        for (field, value) in opcode.spec().fields.iter().zip(self.fields()) {
            write_le(out, value, field.width);
        }
    }

    /// Encode to a standalone record
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.opcode().encoded_len());
        self.encode_into(&mut out);
        out
    }

    /// Decode the operand bytes that follow an opcode byte.
    ///
    /// `operands` must hold exactly `opcode.operand_len()` bytes. A shorter
    /// slice is reported as a truncated stream at offset 0 of the record;
    /// callers that know the stream position should use
    /// [`crate::InstructionReader`] instead.
    pub fn decode(opcode: Opcode, operands: &[u8]) -> Result<Self> {
        let expected = opcode.operand_len();
        if operands.len() < expected {
            return Err(SpecError::TruncatedStream {
                opcode: opcode.to_u8(),
                offset: 0,
                expected,
                found: operands.len(),
            });
        }

        let mut values = Vec::with_capacity(opcode.spec().fields.len());
        let mut pos = 0;
        for field in opcode.spec().fields {
            values.push(read_le(&operands[pos..pos + field.width]));
            pos += field.width;
        }
        Self::from_fields(opcode, &values)
    }
}
