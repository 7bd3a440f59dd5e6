//! SAP-1 memory subsystem.
//!
//! Sixteen 8-bit cells shared between program and data. Addresses are
//! masked to 4 bits, so no access can fall outside the array.

use serde::{Serialize, Deserialize};
use tracing::warn;

/// The number of memory cells in the SAP-1.
pub const MEMORY_SIZE: usize = 16;

/// SAP-1 memory: 16 eight-bit cells.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Create a new memory with all cells zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a cell. The address is wrapped modulo 16.
    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.cells[Self::index(addr)]
    }

    /// Write a cell. The address is wrapped modulo 16.
    #[inline]
    pub fn write(&mut self, addr: u8, value: u8) {
        self.cells[Self::index(addr)] = value;
    }

    #[inline]
    fn index(addr: u8) -> usize {
        (addr as usize) % MEMORY_SIZE
    }

    /// Copy a program image into memory starting at address 0.
    ///
    /// Only the first 16 bytes are copied; the rest are dropped without
    /// error. Cells past the end of a short image keep their old contents.
    /// Returns the number of bytes copied.
    pub fn load(&mut self, image: &[u8]) -> usize {
        let count = image.len().min(MEMORY_SIZE);
        if image.len() > MEMORY_SIZE {
            warn!(
                size = image.len(),
                "program image longer than {} bytes, truncating", MEMORY_SIZE
            );
        }
        self.cells[..count].copy_from_slice(&image[..count]);
        count
    }

    /// All cells, address 0 first.
    pub fn cells(&self) -> &[u8; MEMORY_SIZE] {
        &self.cells
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only show non-zero cells
        let non_zero: Vec<_> = self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell != 0)
            .map(|(addr, cell)| (addr, *cell))
            .collect();

        f.debug_struct("Memory")
            .field("non_zero_cells", &non_zero)
            .field("total_cells", &MEMORY_SIZE)
            .finish()
    }
}
