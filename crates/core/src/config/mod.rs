//! Configuration module for hdlrefactor
//!
//! This module provides configuration structures and loading mechanisms for the
//! refactoring toolchain. Configuration can be loaded from TOML files and/or
//! environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path of the configuration file picked up when none is given
///
/// The file is looked up in the current working directory, next to the
/// library being migrated.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Main configuration structure for hdlrefactor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rename database construction
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Declaration analysis and database merging
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Source tree rewriting
    #[serde(default)]
    pub refactor: RefactorConfig,
}

/// Options applied when a persisted rename table is turned into a database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Add a lowercase-keyed duplicate of every rename entry
    #[serde(default = "default_fix_case")]
    pub fix_case: bool,

    /// Synthesize a `<scope><tb_suffix>` scope for every scope
    #[serde(default = "default_add_tb_variants")]
    pub add_tb_variants: bool,

    /// Suffix of generated test-bench scopes
    #[serde(default = "default_tb_suffix")]
    pub tb_suffix: String,

    /// Scopes sharing the table of another scope, applied in order
    ///
    /// Kept as a list of tables rather than a map so scope names keep their
    /// case through the `config` crate, which lowercases map keys.
    #[serde(default = "default_aliases")]
    pub aliases: Vec<ScopeAlias>,
}

/// A scope bound to a copy of another scope's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeAlias {
    /// Name of the scope to create
    pub alias: String,
    /// Existing scope whose table is copied
    pub target: String,
}

impl ScopeAlias {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            fix_case: default_fix_case(),
            add_tb_variants: default_add_tb_variants(),
            tb_suffix: default_tb_suffix(),
            aliases: default_aliases(),
        }
    }
}

/// How the declarations of two library versions are paired into renames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Pair old and new declarations by their position in the entity
    #[default]
    Positional,
    /// Pair names that only differ in case and underscores, then fall back
    /// to position for whatever is left
    NameAware,
}

/// Configuration for the declaration analyzer and the database merge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Declared names that never take part in a rename
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,

    /// Pairing of old and new declarations
    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    /// File name pattern of library sources scanned for entity declarations
    #[serde(default = "default_library_pattern")]
    pub library_pattern: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            blacklist: default_blacklist(),
            merge_strategy: MergeStrategy::default(),
            library_pattern: default_library_pattern(),
        }
    }
}

/// Configuration for rewriting source trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactorConfig {
    /// File name pattern of the sources rewritten in place
    #[serde(default = "default_source_pattern")]
    pub source_pattern: String,

    /// Only instantiations of components starting with this prefix switch
    /// the instantiation scope. Empty means every component does.
    #[serde(default)]
    pub component_prefix: String,
}

impl Default for RefactorConfig {
    fn default() -> Self {
        Self {
            source_pattern: default_source_pattern(),
            component_prefix: String::new(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.add_tb_variants && self.database.tb_suffix.is_empty() {
            return Err(Error::config(
                "database.tb_suffix must not be empty when add_tb_variants is set".to_string(),
            ));
        }

        for ScopeAlias { alias, target } in &self.database.aliases {
            if alias == target {
                return Err(Error::config(format!(
                    "Alias '{alias}' refers to itself"
                )));
            }
        }

        if self.analyzer.blacklist.iter().any(|name| name.is_empty()) {
            return Err(Error::config(
                "analyzer.blacklist must not contain empty names".to_string(),
            ));
        }

        for (key, pattern) in [
            ("analyzer.library_pattern", &self.analyzer.library_pattern),
            ("refactor.source_pattern", &self.refactor.source_pattern),
        ] {
            glob::Pattern::new(pattern)
                .map_err(|e| Error::config(format!("Invalid {key} '{pattern}': {e}")))?;
        }

        let prefix = &self.refactor.component_prefix;
        if !prefix.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(Error::config(format!(
                "Invalid refactor.component_prefix '{prefix}'. Must only contain word characters"
            )));
        }

        Ok(())
    }
}
