//! Mach-O symbol table parsing.

use crate::bytes::{read_u16, read_u32, read_u8, Endianness};
use crate::ParseError;

const N_STAB: u8 = 0xE0; // Debugging symbol
const N_PEXT: u8 = 0x10; // Private external
const N_TYPE: u8 = 0x0E; // Type mask
const N_EXT: u8 = 0x01; // External symbol
const N_SECT: u8 = 0x0E; // Defined in section

/// A Mach-O symbol table entry (nlist).
#[derive(Debug, Clone)]
pub struct Nlist {
    /// Index into string table.
    pub n_strx: u32,
    /// Type and binding info.
    pub n_type: u8,
    /// Section number.
    pub n_sect: u8,
    /// Description (for stabs, this has meaning).
    pub n_desc: u16,
}

impl Nlist {
    pub fn size(is_64: bool) -> usize {
        if is_64 {
            16
        } else {
            12
        }
    }

    /// Parse an nlist entry from the start of `data`.
    pub fn parse(data: &[u8], is_64: bool, endianness: Endianness) -> Result<Self, ParseError> {
        crate::bytes::slice(data, 0, Self::size(is_64), "nlist")?;
        Ok(Self {
            n_strx: read_u32(data, 0, endianness)?,
            n_type: read_u8(data, 4)?,
            n_sect: read_u8(data, 5)?,
            n_desc: read_u16(data, 6, endianness)?,
        })
    }

    /// Returns true if this is a debugging symbol.
    pub fn is_stab(&self) -> bool {
        self.n_type & N_STAB != 0
    }

    /// Returns true if this is an external symbol.
    pub fn is_external(&self) -> bool {
        self.n_type & N_EXT != 0
    }

    /// Returns true if this is a private external symbol.
    pub fn is_private_external(&self) -> bool {
        self.n_type & N_PEXT != 0
    }

    /// Returns true if this symbol is defined in a section of this image.
    pub fn is_section_defined(&self) -> bool {
        self.n_type & N_TYPE == N_SECT
    }

    /// Returns true if other images can bind to this symbol.
    pub fn is_exported(&self) -> bool {
        !self.is_stab()
            && self.is_external()
            && !self.is_private_external()
            && self.is_section_defined()
    }
}
