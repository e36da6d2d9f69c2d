//! # UVM Disassembler
//!
//! Disassemble UVM binary instruction streams into assembly text that the
//! assembler accepts again.
//!
//! ## Example
//!
//! ```rust
//! use uvm_disassembler::disassemble;
//!
//! // EQUAL R3, R1, R2
//! let listing = disassemble(&[131, 3, 1, 2]).unwrap();
//! assert!(listing.contains("EQUAL R3, R1, R2"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::disassemble;
pub use decoder::decode;
pub use formatter::format;
