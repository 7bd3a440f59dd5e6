//! Instruction decoder for the SAP-1.
//!
//! Every instruction is a single 8-bit word: the high nibble selects the
//! opcode and the low nibble carries a memory address or an immediate value.
//! All 256 words decode; the six nibbles past HLT are undefined and behave
//! as no-ops.

use std::fmt;
use serde::{Serialize, Deserialize};

/// The 4-bit opcode field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// Load accumulator from memory: A := [addr]
    Lda,
    /// Add memory to accumulator: A := A + [addr]
    Add,
    /// Subtract memory from accumulator: A := A - [addr]
    Sub,
    /// Store accumulator: [addr] := A
    Sta,
    /// Load immediate: A := val
    Ldi,
    /// Unconditional jump: PC := addr
    Jmp,
    /// Jump if the zero flag is set
    Jz,
    /// Jump if the carry flag is set
    Jc,
    /// Copy accumulator to the output register
    Out,
    /// Halt execution
    Hlt,
    /// One of the unassigned nibbles 0xA..=0xF.
    Undefined(u8),
}

impl Opcode {
    // Opcode nibble values, matching the original breadboard microcode ROM.
    const LDA: u8 = 0x0;
    const ADD: u8 = 0x1;
    const SUB: u8 = 0x2;
    const STA: u8 = 0x3;
    const LDI: u8 = 0x4;
    const JMP: u8 = 0x5;
    const JZ: u8 = 0x6;
    const JC: u8 = 0x7;
    const OUT: u8 = 0x8;
    const HLT: u8 = 0x9;

    /// Create from a 4-bit value. Bits above the low nibble are ignored.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            Self::LDA => Opcode::Lda,
            Self::ADD => Opcode::Add,
            Self::SUB => Opcode::Sub,
            Self::STA => Opcode::Sta,
            Self::LDI => Opcode::Ldi,
            Self::JMP => Opcode::Jmp,
            Self::JZ => Opcode::Jz,
            Self::JC => Opcode::Jc,
            Self::OUT => Opcode::Out,
            Self::HLT => Opcode::Hlt,
            other => Opcode::Undefined(other),
        }
    }

    /// Convert back to the 4-bit opcode value.
    pub fn nibble(self) -> u8 {
        match self {
            Opcode::Lda => Self::LDA,
            Opcode::Add => Self::ADD,
            Opcode::Sub => Self::SUB,
            Opcode::Sta => Self::STA,
            Opcode::Ldi => Self::LDI,
            Opcode::Jmp => Self::JMP,
            Opcode::Jz => Self::JZ,
            Opcode::Jc => Self::JC,
            Opcode::Out => Self::OUT,
            Opcode::Hlt => Self::HLT,
            Opcode::Undefined(n) => n & 0x0F,
        }
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Lda => "LDA",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Sta => "STA",
            Opcode::Ldi => "LDI",
            Opcode::Jmp => "JMP",
            Opcode::Jz => "JZ",
            Opcode::Jc => "JC",
            Opcode::Out => "OUT",
            Opcode::Hlt => "HLT",
            Opcode::Undefined(_) => "???",
        }
    }

    /// Whether the low nibble means anything for this opcode.
    pub fn takes_operand(self) -> bool {
        !matches!(self, Opcode::Out | Opcode::Hlt | Opcode::Undefined(_))
    }
}

/// A decoded instruction word.
///
/// Never stored by the CPU; it is re-derived from IR on every execute phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    /// Memory address or immediate value, always in `0..16`.
    pub operand: u8,
}

impl Instruction {
    /// Build an instruction, masking the operand to 4 bits.
    pub fn new(opcode: Opcode, operand: u8) -> Self {
        Self { opcode, operand: operand & 0x0F }
    }

    /// Encode back to an 8-bit instruction word.
    pub fn encode(&self) -> u8 {
        (self.opcode.nibble() << 4) | (self.operand & 0x0F)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::Undefined(_) => write!(f, "??? 0x{:02X}", self.encode()),
            op if op.takes_operand() => write!(f, "{} {}", op.mnemonic(), self.operand),
            op => f.write_str(op.mnemonic()),
        }
    }
}

/// Split an instruction word into opcode (high nibble) and operand (low nibble).
#[inline]
pub fn decode(word: u8) -> Instruction {
    Instruction {
        opcode: Opcode::from_nibble(word >> 4),
        operand: word & 0x0F,
    }
}
