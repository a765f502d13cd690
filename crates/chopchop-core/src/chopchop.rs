//! A session over one digest database.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::candidate::candidates;
use crate::custom::CustomDigest;
use crate::digest::Digests;
use crate::discover::matching_files;
use crate::error::Result;
use crate::exports::{ExportSource, ExportStrategy};
use crate::search::DigestQuery;
use crate::store::{Record, RecordStore};

/// Totals for one populate run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateStats {
    /// Files that matched at least one glob (counted once per glob).
    pub files: usize,
    /// Candidates generated, duplicates included.
    pub candidates: usize,
    /// Rows actually stored.
    pub inserted: usize,
}

/// Open digest database plus the settings used to fill it.
///
/// ```no_run
/// use chopchop_core::{BuiltinDigest, Chopchop};
///
/// # fn main() -> chopchop_core::Result<()> {
/// let mut db = Chopchop::open("chopchop.db")?.with_custom_digest(BuiltinDigest::Ror13);
/// db.populate("/usr/lib", &["*.so*"])?;
/// for name in db.search_digest("0x90AD04A2")? {
///     println!("{}", name);
/// }
/// db.close()
/// # }
/// ```
pub struct Chopchop {
    path: PathBuf,
    store: RecordStore,
    custom: Option<Box<dyn CustomDigest>>,
    exports: Option<Box<dyn ExportSource>>,
    strategy_name: Option<String>,
}

impl Chopchop {
    /// Connect to the database at `database`, creating it if needed.
    ///
    /// Export extraction defaults to the host's native format.
    pub fn open(database: impl AsRef<Path>) -> Result<Self> {
        let path = database.as_ref().to_path_buf();
        info!("connecting to {}", path.display());
        let store = RecordStore::open(&path)?;
        Ok(Self::with_store(path, store))
    }

    /// A session over a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let store = RecordStore::open_in_memory()?;
        Ok(Self::with_store(PathBuf::from(":memory:"), store))
    }

    fn with_store(path: PathBuf, store: RecordStore) -> Self {
        Self {
            path,
            store,
            custom: None,
            exports: None,
            strategy_name: None,
        }
        .with_export_strategy(ExportStrategy::detect())
    }

    /// Compute `custom` for every candidate added from now on.
    pub fn with_custom_digest(mut self, custom: impl CustomDigest + 'static) -> Self {
        self.custom = Some(Box::new(custom));
        self
    }

    /// Select the export reader; `None` disables export candidates.
    pub fn with_export_strategy(mut self, strategy: Option<ExportStrategy>) -> Self {
        self.strategy_name = strategy.map(|s| s.to_string());
        self.exports = strategy.map(|s| Box::new(s) as Box<dyn ExportSource>);
        self
    }

    /// Use an arbitrary export source.
    pub fn with_export_source(mut self, source: impl ExportSource + 'static) -> Self {
        self.strategy_name = Some("custom".to_string());
        self.exports = Some(Box::new(source));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn digests(&self, name: &str) -> Digests {
        Digests::compute(name.as_bytes(), self.custom.as_deref())
    }

    /// Digest and store a single name. Returns whether a row was stored.
    pub fn add(&self, name: &str) -> Result<bool> {
        self.store.insert(name, &self.digests(name))
    }

    /// Add candidates for every file under `directory` matching any glob.
    pub fn populate<S: AsRef<str>>(
        &mut self,
        directory: impl AsRef<Path>,
        globs: &[S],
    ) -> Result<PopulateStats> {
        let directory = directory.as_ref();
        match &self.strategy_name {
            Some(name) => info!("populating using {} strategy", name),
            None => error!(
                "unsupported system: {}, export names will not be added",
                std::env::consts::OS
            ),
        }

        let globs: BTreeSet<&str> = globs.iter().map(AsRef::as_ref).collect();
        let mut stats = PopulateStats::default();

        for glob in globs {
            debug!("searching {} for {}", directory.display(), glob);
            for file in matching_files(directory, glob)? {
                let batch: Vec<(String, Digests)> = candidates(&file, self.exports.as_deref())
                    .map(|name| {
                        let digests = self.digests(&name);
                        (name, digests)
                    })
                    .collect();
                let count = batch.len();
                let inserted = self.store.insert_all(batch)?;
                info!("added {} names from {}", count, file.display());

                stats.files += 1;
                stats.candidates += count;
                stats.inserted += inserted;
            }
        }

        Ok(stats)
    }

    pub fn rowcount(&self) -> Result<u64> {
        self.store.count()
    }

    /// Records whose name matches the SQL `LIKE` pattern.
    pub fn search_name(&self, pattern: &str) -> Result<Vec<Record>> {
        self.store.find_by_name(pattern)
    }

    /// Names whose stored digests match `query`.
    ///
    /// A malformed `0x` query is logged and matches nothing.
    pub fn search_digest(&self, query: impl Into<DigestQuery>) -> Result<Vec<String>> {
        let query = query.into();
        let value = match query.normalize() {
            Ok(value) => value,
            Err(e) => {
                error!("{}", e);
                return Ok(Vec::new());
            }
        };
        debug!("searching digest {} as {}", query, value);
        self.store.find_by_digest(&value)
    }

    /// Close the database.
    pub fn close(self) -> Result<()> {
        info!("closing connection to {}", self.path.display());
        self.store.close()
    }
}
