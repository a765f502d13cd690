//! Export name extraction for the host's native binary format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chopchop_formats::{Elf, ExportTable, MachO, ParseError, Pe};
use tracing::{debug, warn};

/// Something that can list the functions a file exports.
///
/// Implementations never fail: unreadable or unparseable files yield an
/// empty list.
pub trait ExportSource {
    fn exports(&self, path: &Path) -> Vec<String>;
}

/// Which binary reader to use for export candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStrategy {
    Elf,
    Pe,
    MachO,
}

impl ExportStrategy {
    /// Strategy for an operating system name as in `std::env::consts::OS`.
    pub fn for_system(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(Self::Elf),
            "windows" => Some(Self::Pe),
            "macos" => Some(Self::MachO),
            _ => None,
        }
    }

    /// Strategy for the running host.
    pub fn detect() -> Option<Self> {
        Self::for_system(std::env::consts::OS)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Elf => "elf",
            Self::Pe => "pe",
            Self::MachO => "macho",
        }
    }

    fn parse(&self, data: &[u8]) -> Result<Box<dyn ExportTable>, ParseError> {
        Ok(match self {
            Self::Elf => Box::new(Elf::parse(data)?),
            Self::Pe => Box::new(Pe::parse(data)?),
            Self::MachO => Box::new(MachO::parse(data)?),
        })
    }
}

impl ExportSource for ExportStrategy {
    fn exports(&self, path: &Path) -> Vec<String> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match self.parse(&data) {
            Ok(table) => {
                let names = table.exported_functions();
                debug!(
                    "{} exports {} functions ({})",
                    path.display(),
                    names.len(),
                    table.format_name()
                );
                names
            }
            Err(e) => {
                warn!("no exports from {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

impl fmt::Display for ExportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elf" => Ok(Self::Elf),
            "pe" => Ok(Self::Pe),
            "macho" | "mach-o" => Ok(Self::MachO),
            _ => Err(format!("unknown format {:?} (expected elf, pe or macho)", s)),
        }
    }
}
