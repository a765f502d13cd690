//! Traits for binary format abstraction.

/// A parsed binary that can enumerate the functions it exports.
///
/// This trait abstracts over the ELF, Mach-O and PE readers so callers can
/// pick a reader once and treat the result uniformly.
pub trait ExportTable {
    /// Short human-readable format name ("ELF", "PE", "Mach-O").
    fn format_name(&self) -> &'static str;

    /// Returns the names of exported functions, in table order.
    fn exported_functions(&self) -> Vec<String>;
}
