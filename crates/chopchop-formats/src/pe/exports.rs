//! PE export table parsing.

use super::section::{rva_to_offset, SectionHeader};
use crate::bytes::{read_cstring, read_u16, read_u32, slice, Endianness::Little};
use crate::ParseError;

/// Export directory size
pub const EXPORT_DIRECTORY_SIZE: usize = 40;

/// Export directory table
#[derive(Debug, Clone)]
pub struct ExportDirectory {
    /// Number of functions
    pub number_of_functions: u32,
    /// Number of names
    pub number_of_names: u32,
    /// RVA of Export Address Table
    pub address_of_functions: u32,
    /// RVA of Export Name Pointer Table
    pub address_of_names: u32,
    /// RVA of Ordinal Table
    pub address_of_name_ordinals: u32,
}

impl ExportDirectory {
    /// Parse the export directory at `offset`.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, ParseError> {
        let raw = slice(data, offset, EXPORT_DIRECTORY_SIZE, "export directory")?;
        Ok(Self {
            number_of_functions: read_u32(raw, 20, Little)?,
            number_of_names: read_u32(raw, 24, Little)?,
            address_of_functions: read_u32(raw, 28, Little)?,
            address_of_names: read_u32(raw, 32, Little)?,
            address_of_name_ordinals: read_u32(raw, 36, Little)?,
        })
    }
}

/// A named export entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Export name
    pub name: String,
    /// Forwarder string (if this is a forwarded export)
    pub forwarder: Option<String>,
}

/// Parse the named exports of an image, in name pointer table order.
pub fn parse_exports(
    data: &[u8],
    export_dir_rva: u32,
    export_dir_size: u32,
    sections: &[SectionHeader],
) -> Result<Vec<Export>, ParseError> {
    let export_offset = rva_to_offset(export_dir_rva, sections).ok_or_else(|| {
        ParseError::invalid_structure(
            "export directory",
            export_dir_rva as u64,
            "RVA not mapped by any section",
        )
    })?;
    let dir = ExportDirectory::parse(data, export_offset)?;

    let (Some(names_off), Some(ords_off)) = (
        rva_to_offset(dir.address_of_names, sections),
        rva_to_offset(dir.address_of_name_ordinals, sections),
    ) else {
        return Ok(Vec::new());
    };
    let funcs_off = rva_to_offset(dir.address_of_functions, sections);

    let export_start = export_dir_rva as u64;
    let export_end = export_start + export_dir_size as u64;

    let mut exports = Vec::new();
    for i in 0..dir.number_of_names as usize {
        // A count larger than the tables is treated as the end of the table
        let (Ok(name_rva), Ok(index)) = (
            read_u32(data, names_off + i * 4, Little),
            read_u16(data, ords_off + i * 2, Little),
        ) else {
            break;
        };

        let Some(name) = rva_to_offset(name_rva, sections).and_then(|off| read_cstring(data, off))
        else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let rva = if (index as u32) < dir.number_of_functions {
            funcs_off
                .and_then(|off| read_u32(data, off + index as usize * 4, Little).ok())
                .unwrap_or(0)
        } else {
            0
        };

        // An address inside the export directory points at a forwarder string
        let forwarder = if (rva as u64) >= export_start && (rva as u64) < export_end {
            rva_to_offset(rva, sections).and_then(|off| read_cstring(data, off))
        } else {
            None
        };

        exports.push(Export { name, forwarder });
    }

    Ok(exports)
}
