//! PE section table parsing.

use crate::bytes::{read_u32, slice, Endianness::Little};
use crate::ParseError;

pub const SECTION_HEADER_SIZE: usize = 40;

/// A section header.
#[derive(Debug, Clone)]
pub struct SectionHeader {
    pub name: String,
    pub virtual_size: u32,
    pub virtual_address: u32,
    pub size_of_raw_data: u32,
    pub pointer_to_raw_data: u32,
}

impl SectionHeader {
    pub fn parse(data: &[u8], offset: usize) -> Result<Self, ParseError> {
        let raw = slice(data, offset, SECTION_HEADER_SIZE, "PE section header")?;
        let name_len = raw[..8].iter().position(|&b| b == 0).unwrap_or(8);

        Ok(Self {
            name: String::from_utf8_lossy(&raw[..name_len]).into_owned(),
            virtual_size: read_u32(raw, 8, Little)?,
            virtual_address: read_u32(raw, 12, Little)?,
            size_of_raw_data: read_u32(raw, 16, Little)?,
            pointer_to_raw_data: read_u32(raw, 20, Little)?,
        })
    }

    /// Returns true if `rva` falls inside this section's mapped range.
    pub fn contains_rva(&self, rva: u32) -> bool {
        let extent = self.virtual_size.max(self.size_of_raw_data) as u64;
        let start = self.virtual_address as u64;
        (rva as u64) >= start && (rva as u64) < start + extent
    }
}

/// Convert RVA to file offset using the section table.
pub fn rva_to_offset(rva: u32, sections: &[SectionHeader]) -> Option<usize> {
    sections.iter().find(|s| s.contains_rva(rva)).map(|s| {
        let offset_in_section = (rva - s.virtual_address) as usize;
        s.pointer_to_raw_data as usize + offset_in_section
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text() -> SectionHeader {
        SectionHeader {
            name: ".text".to_string(),
            virtual_size: 0x1000,
            virtual_address: 0x1000,
            size_of_raw_data: 0x800,
            pointer_to_raw_data: 0x400,
        }
    }

    #[test]
    fn test_rva_to_offset() {
        let sections = [text()];
        assert_eq!(rva_to_offset(0x1000, &sections), Some(0x400));
        assert_eq!(rva_to_offset(0x1010, &sections), Some(0x410));
        assert_eq!(rva_to_offset(0x2000, &sections), None);
        assert_eq!(rva_to_offset(0x0fff, &sections), None);
    }

    #[test]
    fn test_contains_rva_does_not_overflow() {
        let section = SectionHeader {
            virtual_address: u32::MAX - 4,
            virtual_size: 0x100,
            ..text()
        };
        assert!(section.contains_rva(u32::MAX));
        assert!(!section.contains_rva(0));
    }
}
