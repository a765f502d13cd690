//! PE header parsing (DOS stub, COFF header, optional header).

use crate::bytes::{read_u16, read_u32, Endianness::Little};
use crate::ParseError;

/// "MZ"
pub const DOS_MAGIC: u16 = 0x5A4D;
/// "PE\0\0"
pub const PE_SIGNATURE: u32 = 0x0000_4550;
pub const PE32_MAGIC: u16 = 0x10b;
pub const PE32PLUS_MAGIC: u16 = 0x20b;

pub const IMAGE_DIRECTORY_ENTRY_EXPORT: usize = 0;

const MAX_DATA_DIRECTORIES: u32 = 16;

/// DOS header; only `e_lfanew` matters for locating the PE header.
#[derive(Debug, Clone)]
pub struct DosHeader {
    pub e_lfanew: u32,
}

impl DosHeader {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < 64 {
            return Err(ParseError::too_short(64, data.len()));
        }
        if read_u16(data, 0, Little)? != DOS_MAGIC {
            return Err(ParseError::invalid_magic("MZ", &data[0..2]));
        }
        Ok(Self {
            e_lfanew: read_u32(data, 0x3c, Little)?,
        })
    }
}

/// COFF file header.
#[derive(Debug, Clone)]
pub struct CoffHeader {
    pub machine: u16,
    pub number_of_sections: u16,
    pub size_of_optional_header: u16,
}

impl CoffHeader {
    pub const SIZE: usize = 20;

    pub fn parse(data: &[u8], offset: usize) -> Result<Self, ParseError> {
        Ok(Self {
            machine: read_u16(data, offset, Little)?,
            number_of_sections: read_u16(data, offset + 2, Little)?,
            size_of_optional_header: read_u16(data, offset + 16, Little)?,
        })
    }
}

/// Data directory entry.
#[derive(Debug, Clone, Copy)]
pub struct DataDirectory {
    pub virtual_address: u32,
    pub size: u32,
}

/// Optional header, reduced to the magic and the data directories.
#[derive(Debug, Clone)]
pub struct OptionalHeader {
    pub magic: u16,
    pub data_directories: Vec<DataDirectory>,
}

impl OptionalHeader {
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, ParseError> {
        let magic = read_u16(data, offset, Little)?;
        // NumberOfRvaAndSizes precedes the directory array in both layouts
        let count_offset = match magic {
            PE32_MAGIC => offset + 92,
            PE32PLUS_MAGIC => offset + 108,
            other => {
                return Err(ParseError::invalid_structure(
                    "optional header",
                    offset as u64,
                    format!("unknown magic {:#x}", other),
                ))
            }
        };

        let count = read_u32(data, count_offset, Little)?.min(MAX_DATA_DIRECTORIES);
        let mut data_directories = Vec::with_capacity(count as usize);
        for i in 0..count as usize {
            let dir_offset = count_offset + 4 + i * 8;
            data_directories.push(DataDirectory {
                virtual_address: read_u32(data, dir_offset, Little)?,
                size: read_u32(data, dir_offset + 4, Little)?,
            });
        }

        Ok(Self {
            magic,
            data_directories,
        })
    }

    /// Returns a non-empty data directory by index.
    pub fn data_directory(&self, index: usize) -> Option<DataDirectory> {
        self.data_directories
            .get(index)
            .copied()
            .filter(|d| d.virtual_address != 0 && d.size != 0)
    }
}
