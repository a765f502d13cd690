//! ELF section header parsing.

use super::header::ElfClass;
use crate::bytes::{read_u32, read_u64, Endianness};
use crate::ParseError;

pub const SHT_SYMTAB: u32 = 2;
pub const SHT_STRTAB: u32 = 3;
pub const SHT_DYNSYM: u32 = 11;

/// A parsed section header, reduced to the fields symbol lookup needs.
#[derive(Debug, Clone)]
pub struct SectionHeader {
    /// Section type.
    pub sh_type: u32,
    /// Offset in file.
    pub sh_offset: u64,
    /// Size in bytes.
    pub sh_size: u64,
    /// Link to another section (the string table, for symbol tables).
    pub sh_link: u32,
    /// Entry size (for tables).
    pub sh_entsize: u64,
}

impl SectionHeader {
    /// Size of a section header for the given class.
    pub fn size(class: ElfClass) -> usize {
        match class {
            ElfClass::Elf32 => 40,
            ElfClass::Elf64 => 64,
        }
    }

    /// Parse the section header at `offset`.
    pub fn parse(
        data: &[u8],
        offset: usize,
        class: ElfClass,
        endianness: Endianness,
    ) -> Result<Self, ParseError> {
        let size = Self::size(class);
        let header = crate::bytes::slice(data, offset, size, "ELF section header")?;

        match class {
            ElfClass::Elf32 => Ok(Self {
                sh_type: read_u32(header, 4, endianness)?,
                sh_offset: read_u32(header, 16, endianness)? as u64,
                sh_size: read_u32(header, 20, endianness)? as u64,
                sh_link: read_u32(header, 24, endianness)?,
                sh_entsize: read_u32(header, 36, endianness)? as u64,
            }),
            ElfClass::Elf64 => Ok(Self {
                sh_type: read_u32(header, 4, endianness)?,
                sh_offset: read_u64(header, 24, endianness)?,
                sh_size: read_u64(header, 32, endianness)?,
                sh_link: read_u32(header, 40, endianness)?,
                sh_entsize: read_u64(header, 56, endianness)?,
            }),
        }
    }

    /// Returns true for `.symtab` and `.dynsym` sections.
    pub fn is_symbol_table(&self) -> bool {
        self.sh_type == SHT_SYMTAB || self.sh_type == SHT_DYNSYM
    }

    /// Returns the raw contents of this section.
    pub fn contents<'a>(&self, data: &'a [u8]) -> Result<&'a [u8], ParseError> {
        let start = crate::bytes::to_usize(self.sh_offset, "ELF section offset")?;
        let len = crate::bytes::to_usize(self.sh_size, "ELF section size")?;
        crate::bytes::slice(data, start, len, "ELF section contents")
    }
}
