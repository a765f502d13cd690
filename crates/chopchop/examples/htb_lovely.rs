//! Resolve the API hashes of the HTB "Lovely Malware" sample.
//!
//! The sample resolves imports with a rotate-and-add hash. This example
//! indexes the DLLs it loads with that hash as the custom digest, then
//! looks up the hash values found in the sample.
//!
//! Run with:
//!   cargo run -p chopchop --example htb_lovely -- [SYSTEM32_DIR] [DATABASE]

use std::path::PathBuf;

use chopchop_core::{BuiltinDigest, Chopchop, ExportStrategy, Result};

/// Hash values recovered from the sample.
const SAMPLE_DIGESTS: [u32; 2] = [0x90AD04A2, 0x68936BC0];

/// DLLs the sample resolves functions from.
const SAMPLE_DLLS: [&str; 6] = [
    "ntdll.dll",
    "user32.dll",
    "ws2_32.dll",
    "crypt32.dll",
    "shlwapi.dll",
    "kernel32.dll",
];

fn main() -> Result<()> {
    let mut args = std::env::args_os().skip(1);
    let system32 = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows\System32"));
    let database = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("chopchop.db"));

    let mut db = Chopchop::open(&database)?
        .with_custom_digest(BuiltinDigest::HtbLovely)
        .with_export_strategy(Some(ExportStrategy::Pe));

    if db.rowcount()? == 0 {
        let stats = db.populate(&system32, &SAMPLE_DLLS)?;
        println!(
            "indexed {} names from {} files in {}",
            stats.inserted,
            stats.files,
            system32.display()
        );
    }

    for digest in SAMPLE_DIGESTS {
        for name in db.search_digest(digest)? {
            println!("{:#010x} {}", digest, name);
        }
    }

    db.close()
}
