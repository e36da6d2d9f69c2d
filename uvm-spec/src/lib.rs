//! # UVM Instruction Set Specification
//!
//! Minimal register machine with a byte-oriented, variable-length binary
//! format. This crate is the single source of truth shared by the
//! assembler, the virtual machine and the disassembler.
//!
//! ## Key Features
//! - 4 instructions: LOAD_CONST, READ_MEM, WRITE_MEM, EQUAL
//! - 1-byte opcodes followed by fixed-width little-endian fields
//! - 256 general-purpose registers
//! - 32-bit unsigned cells for registers and memory
//! - Strictly linear execution (no control flow)

pub mod encoding;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;
pub mod stream;

pub use error::{Result, SpecError};
pub use instruction::Instruction;
pub use opcode::{Field, FieldKind, InstructionSpec, Opcode, OperandKind, INSTRUCTION_SET};
pub use program::Program;
pub use register::{Register, NUM_REGISTERS};
pub use stream::{Fetched, InstructionReader};

/// Register and memory cell (32-bit unsigned)
pub type Word = u32;

/// Memory address, wide enough that `register + offset` never wraps
pub type Address = u64;

/// Memory size used when none is given
pub const DEFAULT_MEMORY_SIZE: usize = 1024;
