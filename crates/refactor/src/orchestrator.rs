//! Source tree refactoring
//!
//! Applies the declaration, instantiation and symbol passes to every HDL file
//! of one or more trees, in place, and the generic-flag pass to a simulator
//! script. The first I/O error stops the run; files already rewritten stay
//! rewritten.

use crate::rewriters::{Pass, Rewriters};
use crate::text::{read_source, write_source};
use crate::walk::source_files;
use hdlrefactor_core::config::RefactorConfig;
use hdlrefactor_core::error::{Error, Result};
use hdlrefactor_core::RenameDatabase;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counters of a refactoring run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefactorStats {
    files_processed: usize,
    files_changed: usize,
}

impl RefactorStats {
    pub fn files_processed(&self) -> usize {
        self.files_processed
    }

    pub fn files_changed(&self) -> usize {
        self.files_changed
    }

    fn record(&mut self, changed: bool) {
        self.files_processed += 1;
        if changed {
            self.files_changed += 1;
        }
    }

    fn absorb(&mut self, other: RefactorStats) {
        self.files_processed += other.files_processed;
        self.files_changed += other.files_changed;
    }
}

/// Runs the rewriters over files with one rename database
#[derive(Debug)]
pub struct Refactorer<'db> {
    db: &'db RenameDatabase,
    rewriters: Rewriters,
    pattern: glob::Pattern,
}

impl<'db> Refactorer<'db> {
    /// Fails when `db` holds no scope at all
    pub fn new(db: &'db RenameDatabase, config: &RefactorConfig) -> Result<Self> {
        db.ensure_initialized()?;

        let pattern = glob::Pattern::new(&config.source_pattern).map_err(|e| {
            Error::config(format!(
                "Invalid source pattern '{}': {e}",
                config.source_pattern
            ))
        })?;

        Ok(Self {
            db,
            rewriters: Rewriters::new(config)?,
            pattern,
        })
    }

    /// Apply the source passes to one file in place
    ///
    /// The file is only written when a pass changed it. Returns whether it did.
    pub fn refactor_file(&self, path: &Path) -> Result<bool> {
        info!("Refactoring {}", path.display());

        let original = read_source(path)?;
        let rewritten = self
            .rewriters
            .rewrite_text(&Pass::SOURCE_PASSES, &original, self.db)?;

        if rewritten == original {
            debug!("{} unchanged", path.display());
            return Ok(false);
        }
        write_source(path, &rewritten)?;
        Ok(true)
    }

    /// Apply the source passes to every matching file below `root`
    pub fn refactor_tree(&self, root: &Path) -> Result<RefactorStats> {
        let mut stats = RefactorStats::default();
        for path in source_files(root, &self.pattern)? {
            stats.record(self.refactor_file(&path)?);
        }
        Ok(stats)
    }

    /// Apply the source passes to several trees, one after the other
    pub fn refactor_trees(&self, roots: &[PathBuf]) -> Result<RefactorStats> {
        let mut stats = RefactorStats::default();
        for root in roots {
            stats.absorb(self.refactor_tree(root)?);
        }
        Ok(stats)
    }

    /// Rename the generic flags of a simulator script in place
    pub fn refactor_sim_config(&self, path: &Path) -> Result<bool> {
        info!("Refactoring {}", path.display());
        self.rewrite_file(Pass::SimConfig, path, path)
    }

    /// Run a single pass from `input` into `output`
    pub fn rewrite_file(&self, pass: Pass, input: &Path, output: &Path) -> Result<bool> {
        let rewriter = self.rewriters.get(pass);
        debug!(
            "{} pass: {} -> {}",
            rewriter.name(),
            input.display(),
            output.display()
        );
        rewriter.rewrite_file(input, output, self.db)
    }
}
