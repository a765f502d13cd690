//! # chopchop-formats
//!
//! Exported symbol readers for chopchop. This crate provides parsers for:
//! - ELF (Executable and Linkable Format) - Linux/Unix binaries
//! - Mach-O - macOS/iOS binaries, including universal (fat) files
//! - PE (Portable Executable) - Windows binaries
//!
//! Only the structures needed to enumerate exported function names are
//! decoded. All reads are bounds-checked.

mod bytes;
pub mod elf;
pub mod error;
pub mod macho;
pub mod pe;
pub mod traits;

pub use bytes::Endianness;
pub use elf::Elf;
pub use error::ParseError;
pub use macho::MachO;
pub use pe::Pe;
pub use traits::ExportTable;

/// Detected binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryType {
    Elf,
    MachO,
    Pe,
    Unknown,
}

/// Detect the binary format from magic bytes.
pub fn detect_format(data: &[u8]) -> BinaryType {
    if data.len() < 4 {
        return BinaryType::Unknown;
    }

    if data[0..4] == elf::ELF_MAGIC {
        return BinaryType::Elf;
    }

    // "MZ" followed by a "PE\0\0" signature at e_lfanew
    if data[0..2] == pe::DOS_MAGIC.to_le_bytes() {
        if let Ok(e_lfanew) = bytes::read_u32(data, 0x3c, Endianness::Little) {
            if let Ok(sig) = bytes::read_u32(data, e_lfanew as usize, Endianness::Little) {
                if sig == pe::PE_SIGNATURE {
                    return BinaryType::Pe;
                }
            }
        }
    }

    let magic = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    if macho::is_macho_magic(magic) {
        return BinaryType::MachO;
    }

    BinaryType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_elf() {
        let data = [0x7f, b'E', b'L', b'F', 2, 1, 1, 0];
        assert_eq!(detect_format(&data), BinaryType::Elf);
    }

    #[test]
    fn test_detect_pe() {
        let mut data = vec![0u8; 0x84];
        data[0] = b'M';
        data[1] = b'Z';
        data[0x3c..0x40].copy_from_slice(&0x80u32.to_le_bytes());
        data[0x80..0x84].copy_from_slice(b"PE\0\0");
        assert_eq!(detect_format(&data), BinaryType::Pe);

        // MZ without a PE signature is just a DOS stub
        data[0x80] = 0;
        assert_eq!(detect_format(&data), BinaryType::Unknown);
    }

    #[test]
    fn test_detect_macho() {
        assert_eq!(detect_format(&[0xcf, 0xfa, 0xed, 0xfe]), BinaryType::MachO);
        assert_eq!(detect_format(&[0xfe, 0xed, 0xfa, 0xce]), BinaryType::MachO);
        assert_eq!(detect_format(&[0xca, 0xfe, 0xba, 0xbe]), BinaryType::MachO);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_format(b"MZ"), BinaryType::Unknown);
        assert_eq!(detect_format(b"#!/bin/sh\n"), BinaryType::Unknown);
    }
}
