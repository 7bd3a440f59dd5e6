//! Point-in-time copies of the machine state for display.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::cpu::decode::decode;
use crate::cpu::memory::MEMORY_SIZE;

/// Every observable field of the CPU, copied out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub a: u8,
    pub b: u8,
    pub pc: u8,
    pub mar: u8,
    pub ir: u8,
    pub out: u8,
    pub zero: bool,
    pub carry: bool,
    pub halted: bool,
    pub clock_cycle: u8,
    pub memory: [u8; MEMORY_SIZE],
}

fn flag(set: bool) -> char {
    if set { '1' } else { '0' }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "A={:3} (0x{:02X})  B={:3} (0x{:02X})  OUT={:3}",
            self.a, self.a, self.b, self.b, self.out
        )?;
        writeln!(
            f,
            "PC={:2}  MAR={:2}  IR=0x{:02X} [{}]",
            self.pc, self.mar, self.ir, decode(self.ir)
        )?;
        writeln!(
            f,
            "Z={}  C={}  HALTED={}  T={}",
            flag(self.zero), flag(self.carry), flag(self.halted), self.clock_cycle
        )?;

        // Two rows of eight cells, PC marked with '>'
        for (r, cells) in self.memory.chunks(8).enumerate() {
            write!(f, "{:X}:", r * 8)?;
            for (i, cell) in cells.iter().enumerate() {
                let addr = r * 8 + i;
                let mark = if addr == self.pc as usize { '>' } else { ' ' };
                write!(f, " {}{:02X}", mark, cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut memory = [0u8; MEMORY_SIZE];
        memory[0] = 0x42;
        memory[15] = 0x03;
        Snapshot {
            a: 2,
            b: 0,
            pc: 1,
            mar: 0,
            ir: 0x42,
            out: 2,
            zero: false,
            carry: true,
            halted: false,
            clock_cycle: 4,
            memory,
        }
    }

    #[test]
    fn test_display_dump() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("IR=0x42 [LDI 2]"));
        assert_eq!(lines[2], "Z=0  C=1  HALTED=0  T=4");
        assert!(lines[3].starts_with("0:  42 >00"));
        assert!(lines[4].ends_with(" 03"));
    }

    #[test]
    fn test_json_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["out"], 2);
        assert_eq!(json["carry"], true);
        assert_eq!(json["memory"][15], 3);
    }
}
