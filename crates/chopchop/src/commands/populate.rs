//! Database population.

use std::path::Path;

use anyhow::{Context, Result};
use chopchop_core::Chopchop;
use tracing::info;

pub fn handle_populate_command(db: &mut Chopchop, directory: &Path, globs: &[String]) -> Result<()> {
    let stats = db
        .populate(directory, globs)
        .with_context(|| format!("Failed to populate from {}", directory.display()))?;
    info!(
        "{} files, {} candidates, {} new names",
        stats.files, stats.candidates, stats.inserted
    );
    Ok(())
}
