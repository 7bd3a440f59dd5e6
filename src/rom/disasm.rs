//! Disassembler for SAP-1 images.
//!
//! Every cell is shown both as a word and as the instruction it would
//! decode to; data cells are indistinguishable from code.

use crate::cpu::decode;

/// Disassemble a single word to text.
pub fn disassemble_word(word: u8) -> String {
    decode(word).to_string()
}

/// Disassemble an image into a listing, one line per cell.
pub fn disassemble(image: &[u8]) -> String {
    let mut output = String::new();
    output.push_str("; SAP-1 Disassembly\n");
    output.push_str("; -----------------\n\n");

    for (addr, word) in image.iter().enumerate() {
        let line = disassemble_word(*word);
        output.push_str(&format!("{:2}: 0x{:02X}  {}\n", addr, word, line));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_listing() {
        let listing = disassemble(&[0x42, 0x80, 0x90]);
        let body: Vec<&str> = listing.lines().skip(3).collect();
        assert_eq!(body, vec![" 0: 0x42  LDI 2", " 1: 0x80  OUT", " 2: 0x90  HLT"]);
    }

    #[test]
    fn test_disassemble_word() {
        assert_eq!(disassemble_word(0x2E), "SUB 14");
        assert_eq!(disassemble_word(0xC0), "??? 0xC0");
    }
}
