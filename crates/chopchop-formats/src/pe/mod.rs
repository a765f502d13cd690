//! PE (Portable Executable) export reader.
//!
//! Handles PE32 and PE32+ images. Only the headers, the section table and
//! the export directory are decoded.

mod exports;
mod header;
mod section;

pub use exports::{Export, ExportDirectory};
pub use header::{
    CoffHeader, DataDirectory, DosHeader, OptionalHeader, DOS_MAGIC,
    IMAGE_DIRECTORY_ENTRY_EXPORT, PE32PLUS_MAGIC, PE32_MAGIC, PE_SIGNATURE,
};
pub use section::{rva_to_offset, SectionHeader, SECTION_HEADER_SIZE};

use crate::bytes::{read_u32, Endianness::Little};
use crate::{ExportTable, ParseError};

/// A parsed PE binary.
#[derive(Debug)]
pub struct Pe {
    pub dos_header: DosHeader,
    pub coff_header: CoffHeader,
    pub optional_header: OptionalHeader,
    pub sections: Vec<SectionHeader>,
    /// Named exports.
    pub exports: Vec<Export>,
}

impl Pe {
    /// Parse a PE file from raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let dos_header = DosHeader::parse(data)?;

        let pe_offset = dos_header.e_lfanew as usize;
        let pe_sig = read_u32(data, pe_offset, Little)?;
        if pe_sig != PE_SIGNATURE {
            return Err(ParseError::invalid_magic(
                "PE\\0\\0",
                &data[pe_offset..pe_offset + 4],
            ));
        }

        let coff_offset = pe_offset + 4;
        let coff_header = CoffHeader::parse(data, coff_offset)?;

        let opt_offset = coff_offset + CoffHeader::SIZE;
        let optional_header = OptionalHeader::parse(data, opt_offset)?;

        let sections_offset = opt_offset + coff_header.size_of_optional_header as usize;
        let mut sections = Vec::with_capacity(coff_header.number_of_sections as usize);
        for i in 0..coff_header.number_of_sections as usize {
            sections.push(SectionHeader::parse(
                data,
                sections_offset + i * SECTION_HEADER_SIZE,
            )?);
        }

        let exports = match optional_header.data_directory(IMAGE_DIRECTORY_ENTRY_EXPORT) {
            Some(dir) => exports::parse_exports(data, dir.virtual_address, dir.size, &sections)?,
            None => Vec::new(),
        };

        Ok(Self {
            dos_header,
            coff_header,
            optional_header,
            sections,
            exports,
        })
    }
}

impl ExportTable for Pe {
    fn format_name(&self) -> &'static str {
        "PE"
    }

    fn exported_functions(&self) -> Vec<String> {
        self.exports.iter().map(|e| e.name.clone()).collect()
    }
}
