//! Instruction formatting to assembly text
//!
//! Output is valid assembler input: mnemonics in upper case, operands
//! separated by `, ` and memory operands written as `[R<base> + <offset>]`.

use uvm_spec::{Instruction, Register};

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    let mnemonic = instr.mnemonic();
    match *instr {
        Instruction::LoadConst { reg, value } => {
            format!("{} {}, {}", mnemonic, format_reg(reg), value)
        }
        Instruction::ReadMem { offset, base, dest } => {
            format!("{} {}, {}", mnemonic, format_reg(dest), format_mem(base, offset))
        }
        Instruction::WriteMem { offset, base, src } => {
            format!("{} {}, {}", mnemonic, format_reg(src), format_mem(base, offset))
        }
        Instruction::Equal { dest, lhs, rhs } => format!(
            "{} {}, {}, {}",
            mnemonic,
            format_reg(dest),
            format_reg(lhs),
            format_reg(rhs)
        ),
    }
}

fn format_reg(reg: Register) -> String {
    reg.to_string()
}

fn format_mem(base: Register, offset: u16) -> String {
    format!("[{} + {}]", format_reg(base), offset)
}
