//! # SAP-1 Emulator
//!
//! A cycle-accurate emulator of the 8-bit "Simple-As-Possible" (SAP-1)
//! computer: one accumulator, a 4-bit address space of 16 bytes and a
//! ten-instruction set, stepped one clock phase at a time.

pub mod cpu;
pub mod rom;

// Re-export commonly used types
pub use cpu::{Cpu, Phase, Registers, Memory, Instruction, Opcode, Snapshot, decode};
pub use rom::{disassemble, load_image, parse_image, save_image, ImageError, RomError};
