//! Operand resolution and instruction encoding
//!
//! Operands are validated against the instruction set table in three
//! passes: mnemonic, operand count, operand shapes. Only then are they
//! flattened into field order and range-checked, so nothing is emitted
//! for a line that cannot be encoded.

use uvm_spec::{Instruction, Opcode, SpecError};

use crate::error::{AssemblerError, Result};
use crate::parser::{Operand, ParsedLine, ParsedOperand};

/// Resolve a parsed line into an instruction
pub fn resolve(line: &ParsedLine) -> Result<Instruction> {
    let opcode = Opcode::from_mnemonic(&line.mnemonic).ok_or_else(|| {
        AssemblerError::UnknownInstruction {
            line: 0,
            mnemonic: line.mnemonic.clone(),
        }
    })?;
    let spec = opcode.spec();

    if line.operands.len() != spec.arity() {
        return Err(AssemblerError::ArityError {
            line: 0,
            mnemonic: spec.mnemonic.to_string(),
            expected: spec.arity(),
            found: line.operands.len(),
        });
    }

    for (position, (parsed, expected)) in line.operands.iter().zip(spec.operands).enumerate() {
        let found = parsed.operand.kind();
        if found != *expected {
            return Err(AssemblerError::SyntaxError {
                line: 0,
                column: parsed.column,
                message: format!(
                    "operand {} of {} must be a {}, found {}",
                    position + 1,
                    spec.mnemonic,
                    expected.describe(),
                    found.describe()
                ),
            });
        }
    }

    let values = field_values(&line.operands);
    Instruction::from_fields(opcode, &values).map_err(|e| match e {
        SpecError::InvalidRegister(index) => AssemblerError::InvalidRegister { line: 0, index },
        SpecError::FieldOverflow { field, value, width } => AssemblerError::OperandOutOfRange {
            line: 0,
            field,
            value,
            width,
        },
        other => AssemblerError::SyntaxError {
            line: 0,
            column: 1,
            message: other.to_string(),
        },
    })
}

/// Flatten operands into field order.
///
/// A memory expression contributes `offset` then `reg_base` and always
/// leads the record; the remaining operands follow in source order.
fn field_values(operands: &[ParsedOperand]) -> Vec<u64> {
    let memory = operands.iter().filter_map(|p| match p.operand {
        Operand::Memory { base, offset } => Some([offset, base]),
        _ => None,
    });
    let plain = operands.iter().filter_map(|p| match p.operand {
        Operand::Register(value) | Operand::Immediate(value) => Some(value),
        Operand::Memory { .. } => None,
    });
    memory.flatten().chain(plain).collect()
}

/// Encode instruction to its binary record
pub fn encode(instr: &Instruction) -> Vec<u8> {
    instr.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use uvm_spec::Register;

    fn resolve_text(text: &str) -> Result<Instruction> {
        resolve(&parse_line(text).unwrap().unwrap())
    }

    #[test]
    fn test_resolve_load_const() {
        let instr = resolve_text("LOAD_CONST R1, 100").unwrap();
        assert_eq!(instr, Instruction::LoadConst { reg: Register::new(1), value: 100 });
    }

    #[test]
    fn test_resolve_read_mem_field_order() {
        let instr = resolve_text("READ_MEM R4, [R1 + 2]").unwrap();
        assert_eq!(
            instr,
            Instruction::ReadMem { offset: 2, base: Register::new(1), dest: Register::new(4) }
        );
        assert_eq!(instr.fields(), vec![2, 1, 4]);
    }

    #[test]
    fn test_resolve_write_mem_field_order() {
        let instr = resolve_text("WRITE_MEM R10, [R1 + 3]").unwrap();
        assert_eq!(
            instr,
            Instruction::WriteMem { offset: 3, base: Register::new(1), src: Register::new(10) }
        );
    }

    #[test]
    fn test_resolve_lowercase_mnemonic() {
        assert!(resolve_text("equal R3, R1, R2").is_ok());
    }

    #[test]
    fn test_unknown_instruction() {
        let err = resolve_text("FOO R1, 1").unwrap_err();
        assert!(matches!(err, AssemblerError::UnknownInstruction { ref mnemonic, .. } if mnemonic == "FOO"));
    }

    #[test]
    fn test_equal_arity() {
        assert!(matches!(
            resolve_text("EQUAL R3, R1").unwrap_err(),
            AssemblerError::ArityError { expected: 3, found: 2, .. }
        ));
        assert!(matches!(
            resolve_text("EQUAL R3, R1, R2, R4").unwrap_err(),
            AssemblerError::ArityError { expected: 3, found: 4, .. }
        ));
        assert!(resolve_text("EQUAL R3, R1, R2").is_ok());
    }

    #[test]
    fn test_wrong_operand_shape() {
        let err = resolve_text("READ_MEM R4, 100").unwrap_err();
        match err {
            AssemblerError::SyntaxError { column, message, .. } => {
                assert_eq!(column, 14);
                assert!(message.contains("memory expression"));
            }
            other => panic!("Expected SyntaxError, got {:?}", other),
        }

        assert!(resolve_text("LOAD_CONST 1, 100").is_err());
        assert!(resolve_text("EQUAL R3, R1, 5").is_err());
    }

    #[test]
    fn test_register_out_of_range() {
        assert!(matches!(
            resolve_text("LOAD_CONST R256, 1").unwrap_err(),
            AssemblerError::InvalidRegister { index: 256, .. }
        ));
        assert!(matches!(
            resolve_text("READ_MEM R1, [R999 + 0]").unwrap_err(),
            AssemblerError::InvalidRegister { index: 999, .. }
        ));
    }

    #[test]
    fn test_immediate_out_of_range() {
        assert!(matches!(
            resolve_text("LOAD_CONST R1, 4294967296").unwrap_err(),
            AssemblerError::OperandOutOfRange { field: "const", width: 4, .. }
        ));
        assert!(matches!(
            resolve_text("WRITE_MEM R1, [R2 + 65536]").unwrap_err(),
            AssemblerError::OperandOutOfRange { field: "offset", width: 2, .. }
        ));
        assert!(resolve_text("WRITE_MEM R1, [R2 + 65535]").is_ok());
    }

    #[test]
    fn test_encode() {
        let instr = resolve_text("EQUAL R3, R1, R2").unwrap();
        assert_eq!(encode(&instr), vec![131, 3, 1, 2]);
    }
}
