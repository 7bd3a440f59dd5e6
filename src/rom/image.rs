//! Text ROM image format for SAP-1 programs.
//!
//! One byte per line:
//! - hexadecimal, with or without a `0x` prefix (`0x42`, `42`)
//! - binary with a `0b` prefix (`0b0100_0010`)
//! - anything after `;` is a comment
//! - blank lines are ignored
//!
//! Images longer than 16 bytes parse fine; the CPU truncates on load.

use std::path::Path;
use std::io::{BufRead, BufReader, Write};
use thiserror::Error;
use tracing::debug;

/// Parse an image from text.
pub fn parse_image(text: &str) -> Result<Vec<u8>, ImageError> {
    parse_lines(text.lines().map(|l| Ok(l.to_string())))
}

/// Load an image file from disk.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, ImageError> {
    let file = std::fs::File::open(path.as_ref())
        .map_err(|e| ImageError::Io(e.to_string()))?;
    let reader = BufReader::new(file);

    let bytes = parse_lines(reader.lines().map(|l| l.map_err(|e| ImageError::Io(e.to_string()))))?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "image loaded");
    Ok(bytes)
}

fn parse_lines<I>(lines: I) -> Result<Vec<u8>, ImageError>
where
    I: Iterator<Item = Result<String, ImageError>>,
{
    let mut bytes = Vec::new();

    for (line_num, line_result) in lines.enumerate() {
        let line = line_result?;
        let code = line.split(';').next().unwrap_or("").trim();

        // Skip empty lines and comments
        if code.is_empty() {
            continue;
        }

        let byte = parse_byte(code).map_err(|message| ImageError::Parse {
            line: line_num + 1,
            message,
        })?;
        bytes.push(byte);
    }

    Ok(bytes)
}

fn parse_byte(token: &str) -> Result<u8, String> {
    let cleaned: String = token.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let (digits, radix) = if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else {
        (lower.as_str(), 16)
    };

    if digits.is_empty() {
        return Err(format!("missing digits in '{}'", token));
    }

    // from_str_radix would also take a leading sign
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("'{}' is not a byte value", token));
    }

    u8::from_str_radix(digits, radix)
        .map_err(|_| format!("'{}' is not a byte value", token))
}

/// Save an image to disk, one annotated byte per line.
pub fn save_image<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), ImageError> {
    let mut file = std::fs::File::create(path.as_ref())
        .map_err(|e| ImageError::Io(e.to_string()))?;

    writeln!(file, "; SAP-1 ROM image")
        .map_err(|e| ImageError::Io(e.to_string()))?;
    writeln!(file, "; {} bytes", bytes.len())
        .map_err(|e| ImageError::Io(e.to_string()))?;
    writeln!(file).map_err(|e| ImageError::Io(e.to_string()))?;

    for (addr, byte) in bytes.iter().enumerate() {
        writeln!(file, "0x{:02X} ; {:2}: {}", byte, addr, crate::cpu::decode(*byte))
            .map_err(|e| ImageError::Io(e.to_string()))?;
    }

    Ok(())
}

/// Errors that can occur while reading or writing images.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
