//! Instruction decoder

use uvm_spec::{Fetched, InstructionReader};

use crate::error::Result;

/// Decode a whole binary stream into offset/instruction pairs
pub fn decode(bytes: &[u8]) -> Result<Vec<Fetched>> {
    let fetched = InstructionReader::new(bytes).collect::<uvm_spec::Result<Vec<_>>>()?;
    Ok(fetched)
}
