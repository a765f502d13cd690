//! Caller-supplied digest algorithms.
//!
//! Malware usually resolves imports through a home-grown 32-bit hash. A
//! [`CustomDigest`] computes that hash for every candidate during a
//! populate run so the result can be searched like any stored digest.

use std::fmt;
use std::str::FromStr;

/// A pluggable digest algorithm.
///
/// The returned string is stored verbatim; the implementation chooses its
/// own encoding (hex is conventional so that `0x` queries can match it).
pub trait CustomDigest {
    fn digest(&self, data: &[u8]) -> String;
}

impl<F> CustomDigest for F
where
    F: Fn(&[u8]) -> String,
{
    fn digest(&self, data: &[u8]) -> String {
        self(data)
    }
}

/// Custom digests shipped with chopchop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinDigest {
    /// `h = (b + h) + ror(h, 13)`, seen in the HTB "Lovely Malware" sample.
    HtbLovely,
    /// `h = ror(h, 13) + b`, the classic shellcode API hash.
    Ror13,
}

impl BuiltinDigest {
    pub const ALL: [BuiltinDigest; 2] = [Self::HtbLovely, Self::Ror13];

    pub fn name(&self) -> &'static str {
        match self {
            Self::HtbLovely => "htb-lovely",
            Self::Ror13 => "ror13",
        }
    }

    /// Computes the raw 32-bit hash.
    pub fn hash(&self, data: &[u8]) -> u32 {
        data.iter().fold(0u32, |h, &b| match self {
            Self::HtbLovely => (b as u32).wrapping_add(h).wrapping_add(h.rotate_right(13)),
            Self::Ror13 => h.rotate_right(13).wrapping_add(b as u32),
        })
    }
}

impl CustomDigest for BuiltinDigest {
    fn digest(&self, data: &[u8]) -> String {
        hex::encode(self.hash(data).to_le_bytes())
    }
}

impl fmt::Display for BuiltinDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinDigest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|d| d.name()).collect();
                format!("unknown digest {:?} (known: {})", s, known.join(", "))
            })
    }
}
