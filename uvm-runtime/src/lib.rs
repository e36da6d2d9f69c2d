//! # UVM Runtime
//!
//! Execute UVM binary instruction streams.
//!
//! The VM reads one record at a time, executes it against a register file of
//! 256 cells and a flat memory, and halts when the stream ends. Any decode
//! error or out-of-range address stops execution with a fault carrying the
//! byte offset of the offending instruction.
//!
//! ## Example
//!
//! ```rust
//! use uvm_runtime::{VM, VMConfig};
//!
//! // LOAD_CONST R1, 100
//! let binary = [79u8, 1, 0, 100, 0, 0, 0];
//! let result = VM::new(VMConfig::default()).run(&binary[..]).unwrap();
//! assert_eq!(result.registers[1], 100);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod execute;
pub mod vm;
pub mod io;

pub use state::{VMState, Status};
pub use memory::Memory;
pub use vm::{VM, VMConfig, ExecutionResult, DumpRange};
pub use io::{execute_file, write_dump};
pub use error::{RuntimeError, Result};

use uvm_spec::Word;

/// Simple execution helper
///
/// Runs `binary` on a fresh VM with `memory_size` cells and returns
/// `memory[range]`. The range is checked before anything executes.
pub fn execute(binary: &[u8], memory_size: usize, range: impl Into<DumpRange>) -> Result<Vec<Word>> {
    let range = range.into();
    range.validate(memory_size)?;
    let config = VMConfig {
        memory_size,
        ..VMConfig::default()
    };
    VM::new(config).run(binary)?.dump(range)
}
