//! ELF symbol table parsing.

use super::header::ElfClass;
use crate::bytes::{read_u16, read_u32, read_u8, Endianness};
use crate::ParseError;

// Symbol binding (upper 4 bits of st_info)
const STB_GLOBAL: u8 = 1;
const STB_WEAK: u8 = 2;
const STB_GNU_UNIQUE: u8 = 10;

// Symbol type (lower 4 bits of st_info)
const STT_FUNC: u8 = 2;
const STT_GNU_IFUNC: u8 = 10;

// Symbol visibility (lower 2 bits of st_other)
const STV_DEFAULT: u8 = 0;
const STV_PROTECTED: u8 = 3;

pub const SHN_UNDEF: u16 = 0;

/// A raw symbol table entry.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    /// Symbol name (index into string table).
    pub st_name: u32,
    /// Symbol info (type and binding).
    pub st_info: u8,
    /// Symbol visibility.
    pub st_other: u8,
    /// Section index.
    pub st_shndx: u16,
}

impl SymbolEntry {
    /// Parse a symbol entry from the start of `data`.
    pub fn parse(data: &[u8], class: ElfClass, endianness: Endianness) -> Result<Self, ParseError> {
        // st_value and st_size are not needed to decide exports, so only the
        // name, info, other and shndx fields are decoded.
        match class {
            ElfClass::Elf32 => Ok(Self {
                st_name: read_u32(data, 0, endianness)?,
                st_info: read_u8(data, 12)?,
                st_other: read_u8(data, 13)?,
                st_shndx: read_u16(data, 14, endianness)?,
            }),
            ElfClass::Elf64 => Ok(Self {
                st_name: read_u32(data, 0, endianness)?,
                st_info: read_u8(data, 4)?,
                st_other: read_u8(data, 5)?,
                st_shndx: read_u16(data, 6, endianness)?,
            }),
        }
    }

    pub fn binding(&self) -> u8 {
        self.st_info >> 4
    }

    pub fn kind(&self) -> u8 {
        self.st_info & 0xf
    }

    pub fn visibility(&self) -> u8 {
        self.st_other & 0x3
    }

    pub fn is_defined(&self) -> bool {
        self.st_shndx != SHN_UNDEF
    }

    /// Returns true if the dynamic linker would resolve this symbol as an
    /// exported function of the image.
    pub fn is_exported_function(&self) -> bool {
        self.is_defined()
            && matches!(self.binding(), STB_GLOBAL | STB_WEAK | STB_GNU_UNIQUE)
            && matches!(self.kind(), STT_FUNC | STT_GNU_IFUNC)
            && matches!(self.visibility(), STV_DEFAULT | STV_PROTECTED)
    }
}
