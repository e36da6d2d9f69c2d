//! UVM Assembler
//!
//! Assemble UVM assembly language into a binary instruction stream and a
//! log of every emitted instruction.
//!
//! ## Example
//!
//! ```rust
//! use uvm_assembler::assemble;
//!
//! let source = r#"
//!     LOAD_CONST R1, 247
//!     LOAD_CONST R2, 247
//!     EQUAL R3, R1, R2   # R3 = 1
//! "#;
//!
//! let assembly = assemble(source).unwrap();
//! assert_eq!(assembly.binary.len(), 18);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod log;
pub mod assembler;

pub use error::{AssemblerError, Result};
pub use assembler::{assemble, assemble_file, Assembly};
pub use parser::{parse_instruction, parse_register};
pub use encoder::encode;
pub use log::LogRecord;
