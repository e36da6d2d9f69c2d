//! # UVM Opcode Definitions
//!
//! The instruction set table: every opcode byte, its mnemonic, the shape of
//! its source operands, and the binary layout of its fields.
//!
//! ## Binary Layout
//!
//! ```text
//! Mnemonic    Opcode  Fields (little-endian)                    Total
//! ──────────────────────────────────────────────────────────────────────
//! LOAD_CONST  79      reg:2  const:4                            7
//! READ_MEM    220     offset:2  reg_base:1  reg_dest:1          5
//! WRITE_MEM   74      offset:2  reg_base:1  reg_src:1           5
//! EQUAL       131     reg_dest:1  reg_lhs:1  reg_rhs:1          4
//! ```
//!
//! Instruction records have no header, separator or length prefix; the
//! opcode byte alone determines how many operand bytes follow.

use serde::{Deserialize, Serialize};

/// Instruction opcode (one byte)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// LOAD_CONST: reg = const
    LoadConst = 79,
    /// READ_MEM: reg_dest = mem[reg_base + offset]
    ReadMem = 220,
    /// WRITE_MEM: mem[reg_base + offset] = reg_src
    WriteMem = 74,
    /// EQUAL: reg_dest = (reg_lhs == reg_rhs) ? 1 : 0
    Equal = 131,
}

/// Shape of a source operand as written in assembly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// `R<n>`
    Register,
    /// Bare decimal integer
    Immediate,
    /// `[R<n> + <offset>]`, expands to the offset and base fields
    Memory,
}

impl OperandKind {
    pub const fn describe(self) -> &'static str {
        match self {
            OperandKind::Register => "register",
            OperandKind::Immediate => "immediate",
            OperandKind::Memory => "memory expression",
        }
    }
}

/// What a binary field holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Register index (0-255 regardless of field width)
    Register,
    /// Unsigned immediate filling the whole field
    Immediate,
}

/// One fixed-width field of an encoded instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// Width in bytes
    pub width: usize,
    pub kind: FieldKind,
}

impl Field {
    const fn register(name: &'static str, width: usize) -> Self {
        Self { name, width, kind: FieldKind::Register }
    }

    const fn immediate(name: &'static str, width: usize) -> Self {
        Self { name, width, kind: FieldKind::Immediate }
    }

    /// Largest value the field can hold
    #[inline]
    pub const fn max_value(&self) -> u64 {
        if self.width >= 8 {
            u64::MAX
        } else {
            (1u64 << (self.width * 8)) - 1
        }
    }
}

/// One row of the instruction set table
#[derive(Debug, PartialEq, Eq)]
pub struct InstructionSpec {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    /// Source operands in the order they are written
    pub operands: &'static [OperandKind],
    /// Encoded fields in the order they are emitted
    pub fields: &'static [Field],
}

impl InstructionSpec {
    /// Number of source operands the mnemonic takes
    #[inline]
    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    /// Bytes following the opcode byte
    pub fn operand_len(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    /// Total record length including the opcode byte
    #[inline]
    pub fn encoded_len(&self) -> usize {
        1 + self.operand_len()
    }
}

static LOAD_CONST: InstructionSpec = InstructionSpec {
    opcode: Opcode::LoadConst,
    mnemonic: "LOAD_CONST",
    operands: &[OperandKind::Register, OperandKind::Immediate],
    fields: &[Field::register("reg", 2), Field::immediate("const", 4)],
};

static READ_MEM: InstructionSpec = InstructionSpec {
    opcode: Opcode::ReadMem,
    mnemonic: "READ_MEM",
    operands: &[OperandKind::Register, OperandKind::Memory],
    fields: &[
        Field::immediate("offset", 2),
        Field::register("reg_base", 1),
        Field::register("reg_dest", 1),
    ],
};

static WRITE_MEM: InstructionSpec = InstructionSpec {
    opcode: Opcode::WriteMem,
    mnemonic: "WRITE_MEM",
    operands: &[OperandKind::Register, OperandKind::Memory],
    fields: &[
        Field::immediate("offset", 2),
        Field::register("reg_base", 1),
        Field::register("reg_src", 1),
    ],
};

static EQUAL: InstructionSpec = InstructionSpec {
    opcode: Opcode::Equal,
    mnemonic: "EQUAL",
    operands: &[OperandKind::Register, OperandKind::Register, OperandKind::Register],
    fields: &[
        Field::register("reg_dest", 1),
        Field::register("reg_lhs", 1),
        Field::register("reg_rhs", 1),
    ],
};

/// The complete instruction set, in opcode declaration order
pub static INSTRUCTION_SET: [&InstructionSpec; 4] = [&LOAD_CONST, &READ_MEM, &WRITE_MEM, &EQUAL];

impl Opcode {
    /// All opcodes
    pub const ALL: [Opcode; 4] = [Opcode::LoadConst, Opcode::ReadMem, Opcode::WriteMem, Opcode::Equal];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        INSTRUCTION_SET
            .iter()
            .find(|spec| spec.opcode.to_u8() == value)
            .map(|spec| spec.opcode)
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Look up an opcode by mnemonic (case-insensitive)
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        INSTRUCTION_SET
            .iter()
            .find(|spec| spec.mnemonic.eq_ignore_ascii_case(mnemonic))
            .map(|spec| spec.opcode)
    }

    /// Table row for this opcode
    pub fn spec(self) -> &'static InstructionSpec {
        match self {
            Opcode::LoadConst => &LOAD_CONST,
            Opcode::ReadMem => &READ_MEM,
            Opcode::WriteMem => &WRITE_MEM,
            Opcode::Equal => &EQUAL,
        }
    }

    #[inline]
    pub fn mnemonic(self) -> &'static str {
        self.spec().mnemonic
    }

    #[inline]
    pub fn operand_len(self) -> usize {
        self.spec().operand_len()
    }

    #[inline]
    pub fn encoded_len(self) -> usize {
        self.spec().encoded_len()
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
