//! Memory subsystem
//!
//! A flat, zero-initialized array of 32-bit cells indexed by address.
//! Accesses return `None` outside `[0, size)`; the caller turns that into
//! a fault carrying the instruction offset.

use uvm_spec::{Address, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Word>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Memory {
            cells: vec![0; size],
        }
    }

    /// Number of cells
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, address: Address) -> Option<usize> {
        usize::try_from(address).ok().filter(|&i| i < self.cells.len())
    }

    pub fn load(&self, address: Address) -> Option<Word> {
        self.index(address).map(|i| self.cells[i])
    }

    pub fn store(&mut self, address: Address, value: Word) -> Option<()> {
        let i = self.index(address)?;
        self.cells[i] = value;
        Some(())
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Word> {
        self.cells
    }
}
