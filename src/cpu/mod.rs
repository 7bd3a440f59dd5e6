//! CPU emulation for the SAP-1 computer.
//!
//! This module implements the complete SAP-1 architecture:
//! - 16 eight-bit memory cells shared by program and data
//! - A, B, OUT, IR (8-bit) and PC, MAR (4-bit) registers, Z and C flags
//! - 10-instruction set executed over a six-phase clock cycle

pub mod memory;
pub mod registers;
pub mod decode;
pub mod execute;
pub mod snapshot;

pub use memory::Memory;
pub use registers::Registers;
pub use decode::{decode, Instruction, Opcode};
pub use execute::{Cpu, Phase};
pub use snapshot::Snapshot;
