//! Error types for chopchop-core.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The digest database could not be opened, read or written.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system access failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The populate root is missing or not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A glob given to populate could not be compiled.
    #[error("invalid glob {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A `0x`-prefixed digest query is neither a dword nor a qword.
    #[error("invalid integer hex value {query:?}: expected a dword or qword value, got {digits} hex digits")]
    InvalidDigestWidth { query: String, digits: usize },

    /// A `0x`-prefixed digest query contains non-hex characters.
    #[error("invalid integer hex value {query:?}")]
    InvalidDigestValue { query: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for chopchop-core operations.
pub type Result<T> = std::result::Result<T, Error>;
