//! Bounds-checked reads over raw file data.
//!
//! Every reader in this crate goes through these helpers so that a
//! truncated or hostile header surfaces as a [`ParseError`] instead of a
//! slice-index panic.

use crate::ParseError;

/// Byte order of a binary image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// Returns `len` bytes starting at `offset`.
pub(crate) fn slice<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    context: &'static str,
) -> Result<&'a [u8], ParseError> {
    let end = offset
        .checked_add(len)
        .ok_or(ParseError::Overflow { context })?;
    data.get(offset..end).ok_or(ParseError::TruncatedData {
        expected: end,
        actual: data.len(),
        context,
    })
}

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8, ParseError> {
    Ok(slice(data, offset, 1, "u8")?[0])
}

pub(crate) fn read_u16(data: &[u8], offset: usize, endianness: Endianness) -> Result<u16, ParseError> {
    let b = slice(data, offset, 2, "u16")?;
    let bytes = [b[0], b[1]];
    Ok(match endianness {
        Endianness::Little => u16::from_le_bytes(bytes),
        Endianness::Big => u16::from_be_bytes(bytes),
    })
}

pub(crate) fn read_u32(data: &[u8], offset: usize, endianness: Endianness) -> Result<u32, ParseError> {
    let b = slice(data, offset, 4, "u32")?;
    let bytes = [b[0], b[1], b[2], b[3]];
    Ok(match endianness {
        Endianness::Little => u32::from_le_bytes(bytes),
        Endianness::Big => u32::from_be_bytes(bytes),
    })
}

pub(crate) fn read_u64(data: &[u8], offset: usize, endianness: Endianness) -> Result<u64, ParseError> {
    let b = slice(data, offset, 8, "u64")?;
    let bytes = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
    Ok(match endianness {
        Endianness::Little => u64::from_le_bytes(bytes),
        Endianness::Big => u64::from_be_bytes(bytes),
    })
}

/// Converts a file-provided 64-bit offset or size to `usize`.
pub(crate) fn to_usize(value: u64, context: &'static str) -> Result<usize, ParseError> {
    usize::try_from(value).map_err(|_| ParseError::Overflow { context })
}

/// Reads a NUL-terminated string at `offset`.
///
/// Returns `None` when the offset is out of range or the string is not
/// terminated inside `data`. Invalid UTF-8 is replaced lossily.
pub(crate) fn read_cstring(data: &[u8], offset: usize) -> Option<String> {
    let remaining = data.get(offset..)?;
    let end = remaining.iter().position(|&b| b == 0)?;
    Some(String::from_utf8_lossy(&remaining[..end]).into_owned())
}
