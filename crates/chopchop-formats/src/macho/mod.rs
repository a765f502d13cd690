//! Mach-O (macOS/iOS) export reader.
//!
//! Supports 32-bit and 64-bit images in either byte order and universal
//! (fat) binaries. Exports are taken from the `LC_SYMTAB` symbol table.

mod header;
mod symbol;

pub use header::{
    parse_fat_arches, FatArch, MachHeader, FAT_CIGAM, FAT_MAGIC, MH_CIGAM, MH_CIGAM_64, MH_MAGIC,
    MH_MAGIC_64,
};
pub use symbol::Nlist;

use std::collections::HashSet;

use crate::bytes::{read_cstring, read_u32, slice, Endianness};
use crate::{ExportTable, ParseError};

pub const LC_SYMTAB: u32 = 0x2;

/// Returns true if `magic` (read big-endian) starts a thin or fat Mach-O.
pub fn is_macho_magic(magic: u32) -> bool {
    matches!(
        magic,
        MH_MAGIC | MH_CIGAM | MH_MAGIC_64 | MH_CIGAM_64 | FAT_MAGIC | FAT_CIGAM
    )
}

/// A named entry from a Mach-O symbol table.
#[derive(Debug, Clone)]
pub struct MachSymbol {
    pub name: String,
    pub entry: Nlist,
}

/// A single-architecture Mach-O image.
#[derive(Debug)]
pub struct MachImage {
    pub header: MachHeader,
    /// Offset of this image inside the file (non-zero for fat slices).
    pub offset: usize,
    pub symbols: Vec<MachSymbol>,
}

impl MachImage {
    /// Parse a thin image occupying `data`.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, ParseError> {
        let header = MachHeader::parse(data)?;
        let endianness = header.endianness;

        let mut symbols = Vec::new();
        let mut lc_offset = header.header_size();
        let lc_end = lc_offset.saturating_add(header.sizeofcmds as usize);

        for _ in 0..header.ncmds {
            if lc_offset >= lc_end {
                break;
            }
            let cmd = read_u32(data, lc_offset, endianness)?;
            let cmdsize = read_u32(data, lc_offset + 4, endianness)? as usize;
            if cmdsize < 8 {
                return Err(ParseError::invalid_structure(
                    "load command",
                    lc_offset as u64,
                    format!("command size {} too small", cmdsize),
                ));
            }

            if cmd == LC_SYMTAB {
                let symoff = read_u32(data, lc_offset + 8, endianness)? as usize;
                let nsyms = read_u32(data, lc_offset + 12, endianness)? as usize;
                let stroff = read_u32(data, lc_offset + 16, endianness)? as usize;
                let strsize = read_u32(data, lc_offset + 20, endianness)? as usize;
                Self::parse_symtab(
                    data,
                    &header,
                    (symoff, nsyms),
                    (stroff, strsize),
                    &mut symbols,
                )?;
            }

            lc_offset = lc_offset.saturating_add(cmdsize);
        }

        Ok(Self {
            header,
            offset,
            symbols,
        })
    }

    fn parse_symtab(
        data: &[u8],
        header: &MachHeader,
        (symoff, nsyms): (usize, usize),
        (stroff, strsize): (usize, usize),
        out: &mut Vec<MachSymbol>,
    ) -> Result<(), ParseError> {
        let strtab = slice(data, stroff, strsize, "Mach-O string table")?;
        let entry_size = Nlist::size(header.is_64);
        let table_len = nsyms.checked_mul(entry_size).ok_or(ParseError::Overflow {
            context: "Mach-O symbol table",
        })?;
        let table = slice(data, symoff, table_len, "Mach-O symbol table")?;

        for raw in table.chunks_exact(entry_size) {
            let entry = Nlist::parse(raw, header.is_64, header.endianness)?;
            let name = read_cstring(strtab, entry.n_strx as usize).unwrap_or_default();
            out.push(MachSymbol { name, entry });
        }
        Ok(())
    }

    fn exported_names(&self) -> impl Iterator<Item = &str> {
        self.symbols
            .iter()
            .filter(|s| !s.name.is_empty() && s.entry.is_exported())
            .map(|s| s.name.as_str())
    }
}

/// A parsed Mach-O file: one image, or every slice of a universal binary.
#[derive(Debug)]
pub struct MachO {
    pub images: Vec<MachImage>,
    universal: bool,
}

impl MachO {
    /// Parse a thin or universal Mach-O file from raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let magic = read_u32(data, 0, Endianness::Big)?;
        if magic != FAT_MAGIC && magic != FAT_CIGAM {
            return Ok(Self {
                images: vec![MachImage::parse(data, 0)?],
                universal: false,
            });
        }

        let images = parse_fat_arches(data)?
            .iter()
            .map(|arch| {
                let start = arch.offset as usize;
                let bytes = slice(data, start, arch.size as usize, "fat slice")?;
                MachImage::parse(bytes, start)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            images,
            universal: true,
        })
    }

    /// Returns true if this file is a universal binary.
    pub fn is_universal(&self) -> bool {
        self.universal
    }
}

impl ExportTable for MachO {
    fn format_name(&self) -> &'static str {
        "Mach-O"
    }

    fn exported_functions(&self) -> Vec<String> {
        // Slices of a universal binary usually export the same names
        let mut seen = HashSet::new();
        self.images
            .iter()
            .flat_map(|image| image.exported_names())
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}
