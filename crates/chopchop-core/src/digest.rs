//! The fixed digest set computed for every candidate.

use md5::Md5;
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::custom::CustomDigest;

/// Digests of one candidate, rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digests {
    pub md5: String,
    pub sha1: String,
    /// CRC-32 in little-endian byte order.
    pub crc32: String,
    /// Output of the run's custom algorithm, if one is configured.
    pub custom: Option<String>,
}

impl Digests {
    /// Computes every digest of `data`.
    pub fn compute(data: &[u8], custom: Option<&dyn CustomDigest>) -> Self {
        Self {
            md5: hex::encode(Md5::digest(data)),
            sha1: hex::encode(Sha1::digest(data)),
            crc32: hex::encode(crc32fast::hash(data).to_le_bytes()),
            custom: custom.map(|c| c.digest(data)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_vectors() {
        let d = Digests::compute(b"", None);
        assert_eq!(d.md5, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(d.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(d.crc32, "00000000");
        assert_eq!(d.custom, None);
    }

    #[test]
    fn test_abc_vectors() {
        let d = Digests::compute(b"abc", None);
        assert_eq!(d.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(d.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_crc32_is_little_endian() {
        // CRC-32 of "123456789" is 0xCBF43926
        assert_eq!(Digests::compute(b"123456789", None).crc32, "2639f4cb");
        // CRC-32 of "a" is 0xE8B7BE43
        assert_eq!(Digests::compute(b"a", None).crc32, "43beb7e8");
    }

    #[test]
    fn test_lengths_and_determinism() {
        let a = Digests::compute(b"kernel32.dll", None);
        let b = Digests::compute(b"kernel32.dll", None);
        assert_eq!(a, b);
        assert_eq!(a.md5.len(), 32);
        assert_eq!(a.sha1.len(), 40);
        assert_eq!(a.crc32.len(), 8);
        assert!(a.md5.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_custom_digest_is_verbatim() {
        let custom = |data: &[u8]| format!("len={}", data.len());
        let d = Digests::compute(b"ntdll.dll", Some(&custom as &dyn CustomDigest));
        assert_eq!(d.custom.as_deref(), Some("len=9"));
    }
}
