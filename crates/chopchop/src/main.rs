//! chopchop - reverse lookup of API name digests
//!
//! Usage:
//!   chopchop populate <dir> <glob>...    Add candidates found under a directory
//!   chopchop rowcount                    Count stored names
//!   chopchop search name <pattern>...    Look up names (SQL LIKE)
//!   chopchop search digest <digest>...   Look up names by md5/sha1/crc32/custom

mod commands;
mod output;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chopchop_core::{BuiltinDigest, Chopchop, ExportStrategy};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::SearchAction;
use output::Output;

/// Environment variable that turns on debug logging.
const DEBUG_ENV: &str = "CHOPCHOP_DEBUG";

#[derive(Parser)]
#[command(name = "chopchop", version)]
#[command(about = "Build and query a reverse lookup database of API name digests", long_about = None)]
struct Cli {
    /// Emit one JSON object per result line
    #[arg(long, global = true)]
    json: bool,

    /// Delete the database before running the command
    #[arg(long, global = true)]
    reset: bool,

    /// Path of the digest database
    #[arg(long, global = true, default_value = "chopchop.db")]
    database: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Also store a custom digest (htb-lovely, ror13)
    #[arg(long, global = true)]
    custom_digest: Option<BuiltinDigest>,

    /// Read exports as this format instead of the host's (elf, pe, macho)
    #[arg(long, global = true)]
    format: Option<ExportStrategy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add file names, stems and exported functions found under a directory
    Populate {
        /// Directory to search recursively
        directory: PathBuf,
        /// File name globs, e.g. "*.dll"
        #[arg(required = true)]
        globs: Vec<String>,
    },
    /// Print the number of stored names
    Rowcount,
    /// Search the database
    Search {
        #[command(subcommand)]
        action: SearchAction,
    },
}

fn init_logging(verbose: u8) {
    let debug_env = std::env::var(DEBUG_ENV).map(|v| !v.is_empty()).unwrap_or(false);
    let level = match verbose {
        0 if debug_env => "debug",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn reset_database(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove database: {}", path.display())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.reset {
        reset_database(&cli.database)?;
    }

    let mut db = Chopchop::open(&cli.database)
        .with_context(|| format!("Failed to open database: {}", cli.database.display()))?;
    if let Some(custom) = cli.custom_digest {
        db = db.with_custom_digest(custom);
    }
    if let Some(format) = cli.format {
        db = db.with_export_strategy(Some(format));
    }

    let mut out = Output::new(io::stdout().lock(), cli.json);

    match cli.command {
        Commands::Populate { directory, globs } => {
            commands::handle_populate_command(&mut db, &directory, &globs)?;
        }
        Commands::Rowcount => {
            out.rowcount(db.rowcount()?)?;
        }
        Commands::Search { action } => {
            commands::handle_search_command(&db, action, &mut out)?;
        }
    }

    out.flush()?;
    db.close().context("Failed to close database")?;
    Ok(())
}
