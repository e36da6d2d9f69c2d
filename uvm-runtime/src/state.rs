//! VM state for the UVM

use uvm_spec::{Register, Word, NUM_REGISTERS};

use crate::memory::Memory;

/// Lifecycle of one execution; `Halted` and `Faulted` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Clean end of the instruction stream
    Halted,
    /// Stopped on an error at this byte offset
    Faulted { offset: u64 },
}

/// VM state
#[derive(Debug, Clone)]
pub struct VMState {
    /// General-purpose registers (R0-R255)
    pub registers: [Word; NUM_REGISTERS],

    /// Memory
    pub memory: Memory,

    pub status: Status,

    /// Instructions executed
    pub steps: u64,
}

impl VMState {
    pub fn new(memory_size: usize) -> Self {
        VMState {
            registers: [0; NUM_REGISTERS],
            memory: Memory::new(memory_size),
            status: Status::Running,
            steps: 0,
        }
    }

    #[inline]
    pub fn read_reg(&self, reg: Register) -> Word {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write_reg(&mut self, reg: Register, value: Word) {
        self.registers[reg.index()] = value;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn halt(&mut self) {
        self.status = Status::Halted;
    }

    pub fn fault(&mut self, offset: u64) {
        self.status = Status::Faulted { offset };
    }
}
