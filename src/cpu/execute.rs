//! CPU execution engine for the SAP-1.
//!
//! Implements the six-phase fetch-decode-execute cycle. Each call to
//! [`Cpu::step`] performs exactly one clock phase:
//!
//! | Cycle | Phase | Effect |
//! |---|---|---|
//! | 0 | address setup | `MAR := PC` |
//! | 1 | PC increment | `PC := PC + 1` |
//! | 2 | fetch | `IR := [MAR]` |
//! | 3..=5 | execute | per-opcode micro-steps |

use std::fmt;
use crate::cpu::{Memory, Registers};
use crate::cpu::decode::{decode, Instruction, Opcode};
use crate::cpu::snapshot::Snapshot;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, trace};

/// Number of clock phases in one instruction cycle.
pub const PHASES: u8 = 6;

/// One clock phase of the instruction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// `MAR := PC`
    AddressSetup,
    /// `PC := PC + 1`
    PcIncrement,
    /// `IR := [MAR]`
    Fetch,
    /// Execute micro-step 0, 1 or 2.
    Execute(u8),
}

impl Phase {
    /// Map a clock cycle counter to its phase. The counter is taken modulo 6.
    pub fn from_cycle(cycle: u8) -> Self {
        match cycle % PHASES {
            0 => Phase::AddressSetup,
            1 => Phase::PcIncrement,
            2 => Phase::Fetch,
            t => Phase::Execute(t - 3),
        }
    }

    /// The clock cycle value this phase runs on.
    pub fn cycle(self) -> u8 {
        match self {
            Phase::AddressSetup => 0,
            Phase::PcIncrement => 1,
            Phase::Fetch => 2,
            Phase::Execute(t) => 3 + t,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AddressSetup => f.write_str("T0 MAR<-PC"),
            Phase::PcIncrement => f.write_str("T1 PC++"),
            Phase::Fetch => f.write_str("T2 IR<-RAM"),
            Phase::Execute(t) => write!(f, "T{} EXEC", 3 + t),
        }
    }
}

/// The SAP-1 CPU.
///
/// Owns the whole machine state. There is no shared state between
/// instances; every mutation goes through [`Cpu::step`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    /// CPU registers and flags.
    pub regs: Registers,
    /// Main memory.
    pub mem: Memory,
    /// Set by HLT. While set, `step` only advances the phase counter.
    pub halted: bool,
    /// Current phase of the instruction cycle, always in `0..6`.
    pub clock_cycle: u8,
}

impl Cpu {
    /// Create a new CPU with zeroed state and zeroed memory.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            mem: Memory::new(),
            halted: false,
            clock_cycle: 0,
        }
    }

    /// Create a CPU with a program image already loaded.
    pub fn with_program(image: &[u8]) -> Self {
        let mut cpu = Self::new();
        cpu.load_program(image);
        cpu
    }

    /// Reset registers, flags and the phase counter. Memory is left as is.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.halted = false;
        self.clock_cycle = 0;
    }

    /// Load a program image at address 0.
    ///
    /// Images longer than 16 bytes are truncated. Returns the number of
    /// bytes copied.
    pub fn load_program(&mut self, image: &[u8]) -> usize {
        let copied = self.mem.load(image);
        debug!(copied, "program loaded");
        copied
    }

    /// Advance the machine by one clock phase.
    ///
    /// Returns the phase that was performed.
    pub fn step(&mut self) -> Phase {
        let phase = Phase::from_cycle(self.clock_cycle);

        if !self.halted {
            match phase {
                Phase::AddressSetup => {
                    let pc = self.regs.pc;
                    self.regs.latch_mar(pc);
                }
                Phase::PcIncrement => {
                    self.regs.advance_pc();
                }
                Phase::Fetch => {
                    self.regs.ir = self.mem.read(self.regs.mar);
                }
                Phase::Execute(t) => self.execute(decode(self.regs.ir), t),
            }
        }

        self.clock_cycle = (self.clock_cycle % PHASES + 1) % PHASES;
        trace!(%phase, a = self.regs.a, pc = self.regs.pc, halted = self.halted, "step");
        phase
    }

    /// Step until halted or until `max_cycles` phases have run.
    ///
    /// Returns the number of phases executed.
    pub fn run(&mut self, max_cycles: u64) -> u64 {
        let mut executed = 0;

        while !self.halted && executed < max_cycles {
            self.step();
            executed += 1;
        }

        debug!(executed, halted = self.halted, "run finished");
        executed
    }

    /// Perform execute micro-step `t` (0, 1 or 2) of a decoded instruction.
    fn execute(&mut self, instr: Instruction, t: u8) {
        let operand = instr.operand;

        match (instr.opcode, t) {
            // ==================== Memory operand ====================

            (Opcode::Lda | Opcode::Add | Opcode::Sub | Opcode::Sta, 0) => {
                self.regs.latch_mar(operand);
            }

            (Opcode::Lda, 1) => {
                let value = self.mem.read(self.regs.mar);
                self.regs.set_a(value);
            }

            (Opcode::Add | Opcode::Sub, 1) => {
                self.regs.b = self.mem.read(self.regs.mar);
            }

            (Opcode::Add, 2) => {
                let sum = self.regs.a as u16 + self.regs.b as u16;
                self.regs.carry = sum > 0xFF;
                self.regs.set_a(sum as u8);
            }

            (Opcode::Sub, 2) => {
                let (a, b) = (self.regs.a, self.regs.b);
                self.regs.carry = a < b;
                self.regs.set_a(a.wrapping_sub(b));
            }

            (Opcode::Sta, 1) => {
                self.mem.write(self.regs.mar, self.regs.a);
            }

            // ==================== Immediate ====================

            (Opcode::Ldi, 0) => {
                self.regs.set_a(operand);
            }

            // ==================== Control Flow ====================

            (Opcode::Jmp, 0) => {
                debug!(addr = operand, "jump");
                self.regs.jump(operand);
            }

            (Opcode::Jz, 0) => {
                if self.regs.zero {
                    debug!(addr = operand, "jump on zero");
                    self.regs.jump(operand);
                }
            }

            (Opcode::Jc, 0) => {
                if self.regs.carry {
                    debug!(addr = operand, "jump on carry");
                    self.regs.jump(operand);
                }
            }

            // ==================== Output / Halt ====================

            (Opcode::Out, 0) => {
                self.regs.out = self.regs.a;
                debug!(out = self.regs.out, "output");
            }

            (Opcode::Hlt, 0) => {
                self.halted = true;
                info!(out = self.regs.out, "halted");
            }

            // Remaining micro-steps and undefined opcodes do nothing
            _ => {}
        }
    }

    /// Decode the word currently held in IR.
    pub fn current_instruction(&self) -> Instruction {
        decode(self.regs.ir)
    }

    /// Check if the CPU is halted.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The value in the output register.
    pub fn output(&self) -> u8 {
        self.regs.out
    }

    /// Copy of every observable field.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            a: self.regs.a,
            b: self.regs.b,
            pc: self.regs.pc,
            mar: self.regs.mar,
            ir: self.regs.ir,
            out: self.regs.out,
            zero: self.regs.zero,
            carry: self.regs.carry,
            halted: self.halted,
            clock_cycle: self.clock_cycle,
            memory: *self.mem.cells(),
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("halted", &self.halted)
            .field("clock_cycle", &self.clock_cycle)
            .field("regs", &self.regs)
            .field("mem", &self.mem)
            .finish()
    }
}
