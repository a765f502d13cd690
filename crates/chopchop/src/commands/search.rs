//! Name and digest lookups.

use std::io::Write;

use anyhow::Result;
use chopchop_core::Chopchop;
use clap::Subcommand;

use crate::output::Output;

/// What to search by.
#[derive(Subcommand)]
pub enum SearchAction {
    /// Search by name; `%` and `_` are wildcards, ASCII case is ignored
    Name {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Search by md5, sha1, crc32 or custom digest; `0x` values are read as
    /// little-endian dwords or qwords
    Digest {
        #[arg(required = true)]
        digests: Vec<String>,
    },
}

pub fn handle_search_command<W: Write>(
    db: &Chopchop,
    action: SearchAction,
    out: &mut Output<W>,
) -> Result<()> {
    match action {
        SearchAction::Name { names } => {
            for pattern in &names {
                for record in db.search_name(pattern)? {
                    out.record(&record)?;
                }
            }
        }
        SearchAction::Digest { digests } => {
            for digest in &digests {
                for name in db.search_digest(digest.as_str())? {
                    out.digest_match(digest, &name)?;
                }
            }
        }
    }
    Ok(())
}
