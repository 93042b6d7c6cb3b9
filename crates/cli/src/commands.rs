//! Subcommand implementations
//!
//! Every command loads what it needs from disk, runs one part of the
//! toolchain and reports through `tracing`. Printing is left to main.rs.

use anyhow::{Context, Result};
use hdlrefactor_core::config::Config;
use hdlrefactor_core::database::{read_tables, tables_to_json_string, write_tables};
use hdlrefactor_core::{RenameDatabase, ScopeTables};
use hdlrefactor_refactor::{
    default_seed, DatabaseBuilder, DeclarationAnalyzer, Pass, RefactorStats, Refactorer,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load a persisted rename table and build the database the rewriters use
pub fn load_database(path: &Path, config: &Config) -> Result<RenameDatabase> {
    let db = RenameDatabase::load(path, &config.database)
        .with_context(|| format!("Failed to load rename database {}", path.display()))?;
    if db.is_empty() {
        warn!("Rename database {} holds no scope", path.display());
    }
    Ok(db)
}

/// Scan two library versions and persist the merged rename table
///
/// The seed table defaults to the built-in `#ALL#` renames.
pub fn build_database(
    old_dir: &Path,
    new_dir: &Path,
    db_file: &Path,
    seed: Option<&Path>,
    config: &Config,
) -> Result<ScopeTables> {
    let seed = match seed {
        Some(path) => read_tables(path)
            .with_context(|| format!("Failed to read seed table {}", path.display()))?,
        None => default_seed(),
    };

    let builder = DatabaseBuilder::new(&config.analyzer)?;
    let tables = builder
        .build(old_dir, new_dir, seed)
        .context("Failed to build rename database")?;

    write_tables(db_file, &tables)
        .with_context(|| format!("Failed to write rename database {}", db_file.display()))?;
    info!(
        "Wrote {} scopes to {}",
        tables.len(),
        db_file.display()
    );

    Ok(tables)
}

/// Rewrite source trees in place, then the simulator script if one is given
pub fn refactor(
    database: &Path,
    sim_config: Option<&Path>,
    roots: &[PathBuf],
    config: &Config,
) -> Result<RefactorStats> {
    let db = load_database(database, config)?;
    let refactorer = Refactorer::new(&db, &config.refactor)?;

    let stats = refactorer
        .refactor_trees(roots)
        .context("Failed to refactor sources")?;
    info!(
        "Refactored {} files, {} changed",
        stats.files_processed(),
        stats.files_changed()
    );

    if let Some(script) = sim_config {
        refactorer
            .refactor_sim_config(script)
            .with_context(|| format!("Failed to refactor {}", script.display()))?;
    }

    Ok(stats)
}

/// Run a single pass over one file, in place unless `output` is given
pub fn rewrite(
    database: &Path,
    pass: Pass,
    input: &Path,
    output: Option<&Path>,
    config: &Config,
) -> Result<bool> {
    let db = load_database(database, config)?;
    let refactorer = Refactorer::new(&db, &config.refactor)?;
    let output = output.unwrap_or(input);

    let changed = refactorer
        .rewrite_file(pass, input, output)
        .with_context(|| format!("Failed to run the {pass} pass on {}", input.display()))?;
    info!(
        "{pass}: {} {}",
        output.display(),
        if changed { "changed" } else { "unchanged" }
    );

    Ok(changed)
}

/// Declarations of every entity in a file, as JSON
pub fn analyze(file: &Path) -> Result<String> {
    let analyzer = DeclarationAnalyzer::new()?;
    let declarations = analyzer
        .analyze_file(file)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;
    Ok(tables_to_json_string(&declarations)?)
}
