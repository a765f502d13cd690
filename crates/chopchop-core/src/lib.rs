//! # chopchop-core
//!
//! Reverse lookup of API hashes. Candidate names (file names, stems and
//! exported functions found under a directory) are digested with md5, sha1,
//! crc32 and an optional custom algorithm, and stored in SQLite so that a
//! hash recovered from a sample can be mapped back to the name it came from.

pub mod candidate;
pub mod chopchop;
pub mod custom;
pub mod digest;
pub mod discover;
pub mod error;
pub mod exports;
pub mod search;
pub mod store;

pub use candidate::{candidates, Candidates};
pub use chopchop::{Chopchop, PopulateStats};
pub use custom::{BuiltinDigest, CustomDigest};
pub use digest::Digests;
pub use discover::matching_files;
pub use error::{Error, Result};
pub use exports::{ExportSource, ExportStrategy};
pub use search::DigestQuery;
pub use store::{Record, RecordStore};
