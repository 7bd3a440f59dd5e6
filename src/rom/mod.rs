//! Program sources for the SAP-1.
//!
//! This module provides:
//! - Built-in demo programs
//! - A plain-text ROM image format (load/save)
//! - A disassembler for images

pub mod demos;
pub mod disasm;
pub mod image;

use std::path::Path;
use thiserror::Error;

pub use demos::Demo;
pub use disasm::disassemble;
pub use image::{load_image, parse_image, save_image, ImageError};

/// Resolve a program argument to an image.
///
/// Demo names take precedence; anything else is treated as an image path.
pub fn resolve(program: &str) -> Result<Vec<u8>, RomError> {
    if let Some(demo) = demos::find(program) {
        return Ok(demo.image.to_vec());
    }

    if !Path::new(program).exists() {
        return Err(RomError::UnknownProgram(program.to_string()));
    }

    Ok(load_image(program)?)
}

/// Errors that can occur while resolving a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomError {
    #[error("'{0}' is neither a built-in demo nor an image file")]
    UnknownProgram(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_demo() {
        assert_eq!(resolve("ldi-out").unwrap(), vec![0x42, 0x80, 0x90]);
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(
            resolve("no-such-program"),
            Err(RomError::UnknownProgram("no-such-program".into()))
        );
    }

    #[test]
    fn test_resolve_file() {
        let path = std::env::temp_dir()
            .join(format!("sap1-resolve-test-{}.rom", std::process::id()));
        std::fs::write(&path, "0x4F\n0x80\n0x90\n").unwrap();

        let image = resolve(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);

        assert_eq!(image.unwrap(), vec![0x4F, 0x80, 0x90]);
    }
}
