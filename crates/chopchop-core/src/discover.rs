//! Recursive file discovery.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{trace, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: !cfg!(windows),
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

/// Compiles `glob` so that it matches at any depth below the root.
pub fn compile(glob: &str) -> Result<Pattern> {
    let anchored = format!("**/{}", glob.trim_start_matches("./"));
    Pattern::new(&anchored).map_err(|source| Error::InvalidGlob {
        pattern: glob.to_string(),
        source,
    })
}

/// Returns every regular file below `directory` matching `glob`.
///
/// Files are returned in a stable order (directory entries sorted by
/// name). Symlinks to regular files are included; symlinked directories
/// are not descended into. Unreadable sub-directories are skipped with a
/// warning.
pub fn matching_files(directory: &Path, glob: &str) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(directory).map_err(|e| Error::io(directory, e))?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let pattern = compile(glob)?;
    let options = match_options();
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        // follows symlinks, so soname links like `libc.so.6` are kept
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(directory) else {
            continue;
        };
        // anchor at the root so `**/` also covers top-level files
        let anchored = Path::new(".").join(relative);
        if pattern.matches_path_with(&anchored, options) {
            trace!("matched {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
