//! Virtual Machine for the UVM

use std::fmt;
use std::io::Read;
use std::ops::Range;
use std::str::FromStr;

use uvm_spec::{InstructionReader, Program, Register, Word, DEFAULT_MEMORY_SIZE};

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::state::VMState;

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VMConfig {
    /// Number of memory cells
    pub memory_size: usize,

    /// Emit a `debug` event for every executed instruction
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            trace: false,
        }
    }
}

/// Half-open range of memory cells to report after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpRange {
    pub start: usize,
    pub end: usize,
}

impl DumpRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the range against a memory of `memory_size` cells
    pub fn validate(&self, memory_size: usize) -> Result<Range<usize>> {
        if self.start > self.end || self.end > memory_size {
            return Err(RuntimeError::InvalidDumpRange {
                start: self.start,
                end: self.end,
                memory_size,
            });
        }
        Ok(self.start..self.end)
    }
}

impl From<Range<usize>> for DumpRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl FromStr for DumpRange {
    type Err = RuntimeError;

    /// Accepts `lo..hi` or `lo:hi`
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || RuntimeError::MalformedDumpRange(s.to_string());
        let (lo, hi) = s
            .split_once("..")
            .or_else(|| s.split_once(':'))
            .ok_or_else(malformed)?;
        let start = lo.trim().parse().map_err(|_| malformed())?;
        let end = hi.trim().parse().map_err(|_| malformed())?;
        Ok(Self { start, end })
    }
}

impl fmt::Display for DumpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Final state of a run that reached the end of its stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Register file, indexed by register number
    pub registers: Vec<Word>,

    /// Full memory contents
    pub memory: Vec<Word>,

    /// Number of instructions executed
    pub steps: u64,

    /// Number of bytes consumed from the stream
    pub bytes_read: u64,
}

impl ExecutionResult {
    pub fn register(&self, reg: Register) -> Word {
        self.registers[reg.index()]
    }

    /// Copy of `memory[start..end]`
    pub fn dump(&self, range: impl Into<DumpRange>) -> Result<Vec<Word>> {
        let range = range.into().validate(self.memory.len())?;
        Ok(self.memory[range].to_vec())
    }
}

/// UVM Virtual Machine
pub struct VM {
    state: VMState,
    config: VMConfig,
}

impl VM {
    /// Create a VM with zeroed registers and memory
    pub fn new(config: VMConfig) -> Self {
        Self {
            state: VMState::new(config.memory_size),
            config,
        }
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// Returns `Ok(false)` once the stream is exhausted and the VM has
    /// halted.
    pub fn step<R: Read>(&mut self, reader: &mut InstructionReader<R>) -> Result<bool> {
        if !self.state.is_running() {
            return Ok(false);
        }

        let start = reader.offset();
        let fetched = match reader.next_instruction() {
            Ok(Some(fetched)) => fetched,
            Ok(None) => {
                self.state.halt();
                return Ok(false);
            }
            Err(e) => return Err(self.fault(e.into(), start)),
        };

        if self.config.trace {
            tracing::debug!(
                step = self.state.steps,
                offset = fetched.offset,
                instruction = ?fetched.instruction,
                "execute"
            );
        }

        execute(&fetched.instruction, &mut self.state, fetched.offset)
            .map_err(|e| self.fault(e, fetched.offset))?;
        Ok(true)
    }

    fn fault(&mut self, err: RuntimeError, fallback: u64) -> RuntimeError {
        let offset = err.offset().unwrap_or(fallback);
        self.state.fault(offset);
        tracing::warn!(offset, error = %err, "execution faulted");
        err
    }

    /// Run the VM until the stream ends
    pub fn run<R: Read>(mut self, reader: R) -> Result<ExecutionResult> {
        let mut reader = InstructionReader::new(reader);
        while self.step(&mut reader)? {}

        let bytes_read = reader.offset();
        tracing::debug!(steps = self.state.steps, bytes_read, "halted");

        Ok(ExecutionResult {
            registers: self.state.registers.to_vec(),
            memory: self.state.memory.into_cells(),
            steps: self.state.steps,
            bytes_read,
        })
    }

    /// Run an in-memory program
    pub fn run_program(self, program: &Program) -> Result<ExecutionResult> {
        self.run(program.to_bytes().as_slice())
    }
}
