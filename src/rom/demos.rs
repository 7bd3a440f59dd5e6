//! Built-in demo programs.

/// A named program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static [u8],
    /// Value OUT holds once the program halts.
    pub expected_out: u8,
}

/// LDI 2; OUT; HLT
pub const LDI_OUT: Demo = Demo {
    name: "ldi-out",
    description: "load immediate 2 and output it",
    image: &[0x42, 0x80, 0x90],
    expected_out: 2,
};

/// LDI 5; ADD 15; OUT; HLT with [15] = 3
pub const ADD: Demo = Demo {
    name: "add",
    description: "5 + 3 using a data cell",
    image: &[
        0x45, 0x1F, 0x80, 0x90, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03,
    ],
    expected_out: 8,
};

/// Count 3 down to 0, outputting each value.
pub const COUNTDOWN: Demo = Demo {
    name: "countdown",
    description: "count down from 3 with SUB/JZ/JMP",
    image: &[
        0x43, // 0: LDI 3
        0x80, // 1: OUT
        0x2E, // 2: SUB 14
        0x65, // 3: JZ 5
        0x51, // 4: JMP 1
        0x80, // 5: OUT
        0x90, // 6: HLT
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x01, // 14: constant 1
    ],
    expected_out: 0,
};

/// 250 + 10 overflows; JC takes the branch that outputs the wrapped sum.
pub const OVERFLOW: Demo = Demo {
    name: "overflow",
    description: "250 + 10 sets carry and branches with JC",
    image: &[
        0x0E, // 0: LDA 14
        0x1F, // 1: ADD 15
        0x75, // 2: JC 5
        0x40, // 3: LDI 0
        0x90, // 4: HLT
        0x80, // 5: OUT
        0x90, // 6: HLT
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0xFA, // 14: 250
        0x0A, // 15: 10
    ],
    expected_out: 4,
};

/// Store 7, clobber A, read it back.
pub const STORE: Demo = Demo {
    name: "store",
    description: "STA then LDA round-trip through cell 13",
    image: &[
        0x47, // 0: LDI 7
        0x3D, // 1: STA 13
        0x40, // 2: LDI 0
        0x0D, // 3: LDA 13
        0x80, // 4: OUT
        0x90, // 5: HLT
    ],
    expected_out: 7,
};

/// Every built-in demo.
pub const ALL: &[Demo] = &[LDI_OUT, ADD, COUNTDOWN, OVERFLOW, STORE];

/// Look a demo up by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Demo> {
    ALL.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Cpu;
    use crate::cpu::memory::MEMORY_SIZE;

    #[test]
    fn test_find() {
        assert_eq!(find("add"), Some(&ADD));
        assert_eq!(find("COUNTDOWN"), Some(&COUNTDOWN));
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_images_fit_memory() {
        for demo in ALL {
            assert!(demo.image.len() <= MEMORY_SIZE, "{} too long", demo.name);
        }
    }

    #[test]
    fn test_demos_halt_with_expected_output() {
        for demo in ALL {
            let mut cpu = Cpu::with_program(demo.image);
            cpu.run(1000);
            assert!(cpu.is_halted(), "{} did not halt", demo.name);
            assert_eq!(cpu.output(), demo.expected_out, "{}", demo.name);
        }
    }
}
