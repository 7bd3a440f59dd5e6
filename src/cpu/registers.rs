//! SAP-1 CPU registers.
//!
//! The SAP-1 register file:
//! - A: 8-bit accumulator
//! - B: 8-bit operand register for ADD/SUB
//! - PC: 4-bit program counter
//! - MAR: 4-bit memory address register
//! - IR: 8-bit instruction register
//! - OUT: 8-bit output register
//! - Z / C: zero and carry flags

use serde::{Serialize, Deserialize};

/// Mask applied to every value used as an address.
pub const ADDR_MASK: u8 = 0x0F;

/// The SAP-1 register file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// A: accumulator
    pub a: u8,

    /// B: scratch operand, loaded by ADD and SUB
    pub b: u8,

    /// PC: program counter, always in `0..16`
    pub pc: u8,

    /// MAR: latched address for the current memory access, always in `0..16`
    pub mar: u8,

    /// IR: the fetched instruction word
    pub ir: u8,

    /// OUT: externally visible output
    pub out: u8,

    /// Z: set when the last write to A produced zero
    pub zero: bool,

    /// C: set when the last ADD overflowed or the last SUB borrowed
    pub carry: bool,
}

impl Registers {
    /// Create a new register file with all values zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all registers and flags to zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Write the accumulator and recompute Z from the new value.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
        self.zero = value == 0;
    }

    /// Increment the program counter, wrapping at 16.
    /// Returns the old value.
    pub fn advance_pc(&mut self) -> u8 {
        let old = self.pc;
        self.pc = self.pc.wrapping_add(1) & ADDR_MASK;
        old
    }

    /// Set the program counter to an absolute address.
    pub fn jump(&mut self, addr: u8) {
        self.pc = addr & ADDR_MASK;
    }

    /// Latch an address into MAR.
    pub fn latch_mar(&mut self, addr: u8) {
        self.mar = addr & ADDR_MASK;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_a_updates_zero() {
        let mut regs = Registers::new();

        regs.set_a(0);
        assert!(regs.zero);

        regs.set_a(7);
        assert!(!regs.zero);
        assert_eq!(regs.a, 7);
    }

    #[test]
    fn test_advance_pc_wraps() {
        let mut regs = Registers::new();
        regs.pc = 15;

        let old = regs.advance_pc();
        assert_eq!(old, 15);
        assert_eq!(regs.pc, 0);
    }

    #[test]
    fn test_jump_and_mar_mask() {
        let mut regs = Registers::new();
        regs.jump(0x1A);
        regs.latch_mar(0xF3);
        assert_eq!(regs.pc, 0xA);
        assert_eq!(regs.mar, 0x3);
    }

    #[test]
    fn test_reset() {
        let mut regs = Registers::new();
        regs.set_a(9);
        regs.carry = true;
        regs.out = 4;
        regs.reset();
        assert_eq!(regs, Registers::new());
    }
}
