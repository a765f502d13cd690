//! Candidate name generation.
//!
//! Each file contributes its base name and stem in four letter cases,
//! followed by the names of the functions it exports.

use std::path::{Path, PathBuf};

use crate::exports::ExportSource;

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// The four case variants of `name`: unchanged, upper, lower, capitalized.
pub fn name_variants(name: &str) -> [String; 4] {
    [
        name.to_string(),
        name.to_uppercase(),
        name.to_lowercase(),
        capitalize(&name.to_lowercase()),
    ]
}

/// Lazily yields the candidates for one file.
pub struct Candidates<'a> {
    path: PathBuf,
    variants: std::array::IntoIter<String, 8>,
    source: Option<&'a dyn ExportSource>,
    exports: Option<std::vec::IntoIter<String>>,
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(name) = self.variants.next() {
            return Some(name);
        }
        if self.exports.is_none() {
            let names = self
                .source
                .take()
                .map(|source| source.exports(&self.path))
                .unwrap_or_default();
            self.exports = Some(names.into_iter());
        }
        self.exports.as_mut().and_then(Iterator::next)
    }
}

/// Returns the candidates for `path`.
///
/// Export names are only read once the name variants are exhausted. With no
/// export source the iterator ends after the eight name variants.
pub fn candidates<'a>(path: &Path, exports: Option<&'a dyn ExportSource>) -> Candidates<'a> {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let [b0, b1, b2, b3] = name_variants(&base);
    let [s0, s1, s2, s3] = name_variants(&stem);

    Candidates {
        path: path.to_path_buf(),
        variants: [b0, b1, b2, b3, s0, s1, s2, s3].into_iter(),
        source: exports,
        exports: None,
    }
}
