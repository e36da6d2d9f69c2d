//! Instruction execution for the UVM

use uvm_spec::{Address, Instruction, Register};

use crate::error::{Result, RuntimeError};
use crate::state::VMState;

/// `registers[base] + offset`, computed without wrapping
#[inline]
fn effective_address(state: &VMState, base: Register, offset: u16) -> Address {
    Address::from(state.read_reg(base)) + Address::from(offset)
}

fn out_of_bounds(state: &VMState, address: Address, offset: u64) -> RuntimeError {
    RuntimeError::OutOfBounds {
        address,
        memory_size: state.memory.size(),
        offset,
    }
}

/// Execute single instruction.
///
/// `at` is the byte offset of the instruction's opcode, used for fault
/// reporting. On error the state is left untouched.
pub fn execute(instr: &Instruction, state: &mut VMState, at: u64) -> Result<()> {
    match *instr {
        Instruction::LoadConst { reg, value } => {
            state.write_reg(reg, value);
        }

        Instruction::ReadMem { offset, base, dest } => {
            let address = effective_address(state, base, offset);
            let value = state
                .memory
                .load(address)
                .ok_or_else(|| out_of_bounds(state, address, at))?;
            state.write_reg(dest, value);
        }

        Instruction::WriteMem { offset, base, src } => {
            let address = effective_address(state, base, offset);
            let value = state.read_reg(src);
            if state.memory.store(address, value).is_none() {
                return Err(out_of_bounds(state, address, at));
            }
        }

        Instruction::Equal { dest, lhs, rhs } => {
            let result = (state.read_reg(lhs) == state.read_reg(rhs)) as u32;
            state.write_reg(dest, result);
        }
    }

    state.steps += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: u8) -> Register {
        Register::new(n)
    }

    #[test]
    fn test_load_const() {
        let mut state = VMState::new(16);
        execute(&Instruction::LoadConst { reg: r(1), value: 100 }, &mut state, 0).unwrap();
        assert_eq!(state.registers[1], 100);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_read_mem() {
        let mut state = VMState::new(16);
        state.memory.store(7, 42);
        state.write_reg(r(1), 5);
        execute(&Instruction::ReadMem { offset: 2, base: r(1), dest: r(4) }, &mut state, 0).unwrap();
        assert_eq!(state.registers[4], 42);
    }

    #[test]
    fn test_write_mem() {
        let mut state = VMState::new(16);
        state.write_reg(r(3), 10);
        state.write_reg(r(5), 99);
        execute(&Instruction::WriteMem { offset: 1, base: r(3), src: r(5) }, &mut state, 0).unwrap();
        assert_eq!(state.memory.load(11), Some(99));
    }

    #[test]
    fn test_equal() {
        let mut state = VMState::new(0);
        state.write_reg(r(1), 247);
        state.write_reg(r(2), 247);
        state.write_reg(r(4), 3);
        execute(&Instruction::Equal { dest: r(3), lhs: r(1), rhs: r(2) }, &mut state, 0).unwrap();
        execute(&Instruction::Equal { dest: r(5), lhs: r(1), rhs: r(4) }, &mut state, 4).unwrap();
        assert_eq!(state.registers[3], 1);
        assert_eq!(state.registers[5], 0);
    }

    #[test]
    fn test_equal_same_register() {
        let mut state = VMState::new(0);
        state.write_reg(r(1), 5);
        execute(&Instruction::Equal { dest: r(1), lhs: r(1), rhs: r(1) }, &mut state, 0).unwrap();
        assert_eq!(state.registers[1], 1);
    }

    #[test]
    fn test_last_cell_is_addressable() {
        let mut state = VMState::new(16);
        state.write_reg(r(1), 15);
        state.write_reg(r(2), 8);
        execute(&Instruction::WriteMem { offset: 0, base: r(1), src: r(2) }, &mut state, 0).unwrap();
        assert_eq!(state.memory.load(15), Some(8));
    }

    #[test]
    fn test_out_of_bounds_read() {
        let mut state = VMState::new(16);
        state.write_reg(r(1), 16);
        let err = execute(&Instruction::ReadMem { offset: 0, base: r(1), dest: r(2) }, &mut state, 9)
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::OutOfBounds { address: 16, memory_size: 16, offset: 9 }
        ));
        assert_eq!(state.registers[2], 0);
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_address_does_not_wrap() {
        let mut state = VMState::new(16);
        state.write_reg(r(1), u32::MAX);
        let err = execute(
            &Instruction::WriteMem { offset: u16::MAX, base: r(1), src: r(2) },
            &mut state,
            0,
        )
        .unwrap_err();
        match err {
            RuntimeError::OutOfBounds { address, .. } => {
                assert_eq!(address, u32::MAX as u64 + u16::MAX as u64);
            }
            other => panic!("Expected OutOfBounds, got {:?}", other),
        }
        assert!(state.memory.as_slice().iter().all(|&c| c == 0));
    }
}
