//! Mach-O header and universal (fat) header parsing.

use crate::bytes::{read_u32, Endianness};
use crate::ParseError;

// Magic numbers as read big-endian from the first four bytes
pub const MH_MAGIC: u32 = 0xFEEDFACE;
pub const MH_CIGAM: u32 = 0xCEFAEDFE;
pub const MH_MAGIC_64: u32 = 0xFEEDFACF;
pub const MH_CIGAM_64: u32 = 0xCFFAEDFE;
pub const FAT_MAGIC: u32 = 0xCAFEBABE;
pub const FAT_CIGAM: u32 = 0xBEBAFECA;

/// Java class files share the fat magic; real universal binaries carry a
/// handful of slices at most.
const MAX_FAT_ARCHES: u32 = 32;
const FAT_ARCH_SIZE: usize = 20;

/// Mach-O header.
#[derive(Debug, Clone)]
pub struct MachHeader {
    pub is_64: bool,
    pub endianness: Endianness,
    pub cputype: u32,
    pub filetype: u32,
    pub ncmds: u32,
    pub sizeofcmds: u32,
}

impl MachHeader {
    /// Parse a Mach-O header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let magic = read_u32(data, 0, Endianness::Big)?;
        let (is_64, endianness) = match magic {
            MH_MAGIC => (false, Endianness::Big),
            MH_CIGAM => (false, Endianness::Little),
            MH_MAGIC_64 => (true, Endianness::Big),
            MH_CIGAM_64 => (true, Endianness::Little),
            _ => return Err(ParseError::invalid_magic("Mach-O", data)),
        };

        let header = Self {
            is_64,
            endianness,
            cputype: read_u32(data, 4, endianness)?,
            filetype: read_u32(data, 12, endianness)?,
            ncmds: read_u32(data, 16, endianness)?,
            sizeofcmds: read_u32(data, 20, endianness)?,
        };
        if data.len() < header.header_size() {
            return Err(ParseError::too_short(header.header_size(), data.len()));
        }
        Ok(header)
    }

    /// Size of the header; load commands follow it.
    pub fn header_size(&self) -> usize {
        if self.is_64 {
            32
        } else {
            28
        }
    }
}

/// One slice of a universal binary.
#[derive(Debug, Clone)]
pub struct FatArch {
    pub cputype: u32,
    pub cpusubtype: u32,
    pub offset: u32,
    pub size: u32,
}

/// Parse the slice table of a universal binary.
pub fn parse_fat_arches(data: &[u8]) -> Result<Vec<FatArch>, ParseError> {
    let endianness = match read_u32(data, 0, Endianness::Big)? {
        FAT_MAGIC => Endianness::Big,
        FAT_CIGAM => Endianness::Little,
        _ => return Err(ParseError::invalid_magic("fat Mach-O", data)),
    };

    let nfat_arch = read_u32(data, 4, endianness)?;
    if nfat_arch > MAX_FAT_ARCHES {
        return Err(ParseError::invalid_structure(
            "fat header",
            4,
            format!("implausible slice count {}", nfat_arch),
        ));
    }

    (0..nfat_arch as usize)
        .map(|i| {
            let offset = 8 + i * FAT_ARCH_SIZE;
            Ok(FatArch {
                cputype: read_u32(data, offset, endianness)?,
                cpusubtype: read_u32(data, offset + 4, endianness)?,
                offset: read_u32(data, offset + 8, endianness)?,
                size: read_u32(data, offset + 12, endianness)?,
            })
        })
        .collect()
}
