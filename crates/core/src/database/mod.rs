//! Rename database
//!
//! A rename database maps a component scope (entity or package name) to a
//! table of `old name -> new name` entries. The distinguished [`ALL_SCOPE`]
//! holds renames shared by every component, such as package-level functions.
//!
//! The database is built once from a persisted table and then only read.
//! Rewriters receive it by reference.

mod persist;

pub use persist::{read_tables, tables_from_json_str, tables_to_json_string, write_tables};

use crate::config::{DatabaseConfig, ScopeAlias};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, warn};

/// Scope holding renames that apply to every component
pub const ALL_SCOPE: &str = "#ALL#";

/// Old name -> new name, in insertion order
pub type RenameTable = IndexMap<String, String>;

/// Scope name -> rename table, in insertion order
pub type ScopeTables = IndexMap<String, RenameTable>;

/// Outcome of resolving a name against the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Found in the requested component scope
    Exact(&'a str),
    /// Found in the `#ALL#` scope
    Fallback(&'a str),
    /// Not found, the name stays as it is
    Unchanged,
}

impl<'a> Resolution<'a> {
    /// The new name, if any scope provided one
    pub fn renamed(self) -> Option<&'a str> {
        match self {
            Resolution::Exact(name) | Resolution::Fallback(name) => Some(name),
            Resolution::Unchanged => None,
        }
    }
}

/// How a name is matched during lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Lowercase the name before looking it up
    pub case_fold: bool,
    /// Consult the `#ALL#` scope when the component scope has no entry
    pub use_fallback: bool,
}

impl LookupOptions {
    /// Exact-case lookup in the component scope only
    pub const EXACT: Self = Self {
        case_fold: false,
        use_fallback: false,
    };

    /// Case-folded lookup with `#ALL#` fallback
    pub const FOLDED_WITH_FALLBACK: Self = Self {
        case_fold: true,
        use_fallback: true,
    };
}

/// Read-only rename database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameDatabase {
    scopes: ScopeTables,
}

impl RenameDatabase {
    /// Wrap tables as they are, without case duplicates, variants or aliases
    pub fn from_tables(scopes: ScopeTables) -> Self {
        Self { scopes }
    }

    /// Build a database from a persisted table
    ///
    /// Steps, in order:
    /// 1. with `fix_case`, every entry gets a lowercase-keyed duplicate
    /// 2. with `add_tb_variants`, every scope `s` gets a copy named
    ///    `s<tb_suffix>`, replacing any scope of that name
    /// 3. every alias is bound to a copy of its target's table; an alias may
    ///    target a scope created by an earlier alias
    pub fn build(tables: ScopeTables, config: &DatabaseConfig) -> Self {
        let mut scopes = tables;

        if config.fix_case {
            scopes = with_lowercase_keys(&scopes);
        }

        if config.add_tb_variants {
            scopes = with_tb_variants(&scopes, &config.tb_suffix);
        }

        for ScopeAlias { alias, target } in &config.aliases {
            match scopes.get(target).cloned() {
                Some(table) => {
                    scopes.insert(alias.clone(), table);
                }
                None => warn!("Skipping alias '{alias}': scope '{target}' does not exist"),
            }
        }

        debug!("Rename database built with {} scopes", scopes.len());
        Self { scopes }
    }

    /// Parse a JSON rename table and build a database from it
    pub fn from_json_str(content: &str, config: &DatabaseConfig) -> Result<Self> {
        Ok(Self::build(tables_from_json_str(content)?, config))
    }

    /// Read a JSON rename table from disk and build a database from it
    pub fn load(path: &Path, config: &DatabaseConfig) -> Result<Self> {
        Ok(Self::build(read_tables(path)?, config))
    }

    /// Fails unless the database holds at least one scope
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.scopes.is_empty() {
            return Err(Error::DatabaseNotInitialized);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Number of scopes, derived ones included
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn scope(&self, name: &str) -> Option<&RenameTable> {
        self.scopes.get(name)
    }

    pub fn scopes(&self) -> &ScopeTables {
        &self.scopes
    }

    /// Resolve `name` within `scope`, reporting where the rename came from
    pub fn resolve(&self, scope: &str, name: &str, options: LookupOptions) -> Resolution<'_> {
        let folded;
        let key = if options.case_fold {
            folded = name.to_lowercase();
            folded.as_str()
        } else {
            name
        };

        if let Some(renamed) = self.scopes.get(scope).and_then(|t| t.get(key)) {
            return Resolution::Exact(renamed);
        }

        if options.use_fallback {
            if let Some(renamed) = self.scopes.get(ALL_SCOPE).and_then(|t| t.get(key)) {
                return Resolution::Fallback(renamed);
            }
        }

        Resolution::Unchanged
    }

    /// New name for `name` within `scope`, or `name` itself when there is none
    pub fn lookup<'a>(&'a self, scope: &str, name: &'a str, options: LookupOptions) -> &'a str {
        self.resolve(scope, name, options).renamed().unwrap_or(name)
    }
}

fn with_lowercase_keys(scopes: &ScopeTables) -> ScopeTables {
    let mut result = scopes.clone();
    for (scope, table) in scopes {
        if let Some(target) = result.get_mut(scope) {
            for (from, to) in table {
                target.insert(from.to_lowercase(), to.clone());
            }
        }
    }
    result
}

fn with_tb_variants(scopes: &ScopeTables, suffix: &str) -> ScopeTables {
    let mut result = scopes.clone();
    for (scope, table) in scopes {
        result.insert(format!("{scope}{suffix}"), table.clone());
    }
    result
}
