//! ELF (Executable and Linkable Format) export reader.
//!
//! Supports 32-bit and 64-bit images in either byte order. Exports are
//! read from `.dynsym`; images without a dynamic symbol table (static
//! executables, relocatable objects) fall back to `.symtab`.

mod header;
mod section;
mod symbol;

pub use header::{ElfClass, ElfHeader, ElfType, ELF_MAGIC};
pub use section::{SectionHeader, SHT_DYNSYM, SHT_STRTAB, SHT_SYMTAB};
pub use symbol::{SymbolEntry, SHN_UNDEF};

use crate::bytes::{read_cstring, to_usize};
use crate::{ExportTable, ParseError};

/// A named entry from an ELF symbol table.
#[derive(Debug, Clone)]
pub struct ElfSymbol {
    pub name: String,
    pub entry: SymbolEntry,
}

/// A parsed ELF binary.
#[derive(Debug)]
pub struct Elf {
    /// Parsed ELF header.
    pub header: ElfHeader,
    /// Section headers.
    pub sections: Vec<SectionHeader>,
    /// Entries of the symbol table exports are read from.
    symbols: Vec<ElfSymbol>,
}

impl Elf {
    /// Parse an ELF file from raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let header = ElfHeader::parse(data)?;
        let sections = Self::parse_section_headers(data, &header)?;

        // Prefer the dynamic symbol table, it is what the loader exports
        let has_dynsym = sections.iter().any(|s| s.sh_type == SHT_DYNSYM);
        let wanted = if has_dynsym { SHT_DYNSYM } else { SHT_SYMTAB };

        let mut symbols = Vec::new();
        for section in sections.iter().filter(|s| s.sh_type == wanted) {
            Self::parse_symbols(data, section, &sections, &header, &mut symbols)?;
        }

        Ok(Self {
            header,
            sections,
            symbols,
        })
    }

    fn parse_section_headers(
        data: &[u8],
        header: &ElfHeader,
    ) -> Result<Vec<SectionHeader>, ParseError> {
        let entry_size = header.e_shentsize as usize;
        if header.e_shnum > 0 && entry_size < SectionHeader::size(header.class) {
            return Err(ParseError::invalid_structure(
                "ELF header",
                header.e_shoff,
                format!("section header entry size too small: {}", entry_size),
            ));
        }

        let mut sections = Vec::with_capacity(header.e_shnum as usize);
        let mut offset = to_usize(header.e_shoff, "section header offset")?;
        for _ in 0..header.e_shnum {
            sections.push(SectionHeader::parse(
                data,
                offset,
                header.class,
                header.endianness,
            )?);
            offset = offset
                .checked_add(entry_size)
                .ok_or(ParseError::Overflow {
                    context: "section header table",
                })?;
        }

        Ok(sections)
    }

    fn parse_symbols(
        data: &[u8],
        section: &SectionHeader,
        sections: &[SectionHeader],
        header: &ElfHeader,
        out: &mut Vec<ElfSymbol>,
    ) -> Result<(), ParseError> {
        let Some(strtab_section) = sections.get(section.sh_link as usize) else {
            return Err(ParseError::invalid_structure(
                "ELF symbol table",
                section.sh_offset,
                format!("string table index {} out of range", section.sh_link),
            ));
        };
        let strtab = strtab_section.contents(data)?;
        let table = section.contents(data)?;

        let entry_size = to_usize(section.sh_entsize, "symbol entry size")?;
        if entry_size == 0 {
            return Ok(());
        }

        for raw in table.chunks_exact(entry_size) {
            let entry = SymbolEntry::parse(raw, header.class, header.endianness)?;
            let name = read_cstring(strtab, entry.st_name as usize).unwrap_or_default();
            out.push(ElfSymbol { name, entry });
        }

        Ok(())
    }

    /// Returns all entries of the symbol table exports are read from.
    pub fn symbols(&self) -> &[ElfSymbol] {
        &self.symbols
    }

    /// Returns true if this is a relocatable object file.
    pub fn is_relocatable(&self) -> bool {
        self.header.file_type == ElfType::Relocatable
    }
}

impl ExportTable for Elf {
    fn format_name(&self) -> &'static str {
        "ELF"
    }

    fn exported_functions(&self) -> Vec<String> {
        self.symbols
            .iter()
            .filter(|s| !s.name.is_empty() && s.entry.is_exported_function())
            .map(|s| s.name.clone())
            .collect()
    }
}
