//! ELF header parsing.

use crate::bytes::{read_u16, read_u32, read_u64, Endianness};
use crate::ParseError;

/// ELF magic bytes.
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// ELF class (32-bit or 64-bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    Elf32,
    Elf64,
}

/// ELF file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    Other(u16),
}

impl From<u16> for ElfType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Relocatable,
            2 => Self::Executable,
            3 => Self::SharedObject,
            4 => Self::Core,
            other => Self::Other(other),
        }
    }
}

/// The parts of the ELF header needed to reach the section table.
#[derive(Debug)]
pub struct ElfHeader {
    pub class: ElfClass,
    pub endianness: Endianness,
    pub file_type: ElfType,
    /// Section header table file offset.
    pub e_shoff: u64,
    /// Section header table entry size.
    pub e_shentsize: u16,
    /// Section header table entry count.
    pub e_shnum: u16,
}

impl ElfHeader {
    const EI_NIDENT: usize = 16;
    const ELF32_HEADER_SIZE: usize = 52;
    const ELF64_HEADER_SIZE: usize = 64;

    /// Parse an ELF header from bytes.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < Self::EI_NIDENT {
            return Err(ParseError::too_short(Self::EI_NIDENT, data.len()));
        }

        if data[0..4] != ELF_MAGIC {
            return Err(ParseError::invalid_magic("ELF", &data[0..4]));
        }

        let class = match data[4] {
            1 => ElfClass::Elf32,
            2 => ElfClass::Elf64,
            other => {
                return Err(ParseError::invalid_structure(
                    "ELF header",
                    4,
                    format!("invalid ELF class: {}", other),
                ))
            }
        };

        let endianness = match data[5] {
            1 => Endianness::Little,
            2 => Endianness::Big,
            other => {
                return Err(ParseError::invalid_structure(
                    "ELF header",
                    5,
                    format!("invalid endianness: {}", other),
                ))
            }
        };

        let header_size = match class {
            ElfClass::Elf32 => Self::ELF32_HEADER_SIZE,
            ElfClass::Elf64 => Self::ELF64_HEADER_SIZE,
        };
        if data.len() < header_size {
            return Err(ParseError::too_short(header_size, data.len()));
        }

        let file_type = ElfType::from(read_u16(data, 16, endianness)?);

        // e_shoff and the trailing u16 fields sit at class-dependent offsets
        let (e_shoff, tail) = match class {
            ElfClass::Elf32 => (read_u32(data, 32, endianness)? as u64, 46),
            ElfClass::Elf64 => (read_u64(data, 40, endianness)?, 58),
        };

        Ok(Self {
            class,
            endianness,
            file_type,
            e_shoff,
            e_shentsize: read_u16(data, tail, endianness)?,
            e_shnum: read_u16(data, tail + 2, endianness)?,
        })
    }
}
