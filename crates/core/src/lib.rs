//! Core types for the hdlrefactor toolchain
//!
//! This crate provides the foundations shared by the rewriters and the CLI:
//!
//! - **Rename database**: per-component `old -> new` symbol tables with a
//!   global `#ALL#` fallback scope
//! - **Configuration**: toolchain configuration management
//! - **Error handling**: Unified error types
//!

pub mod config;
pub mod database;
pub mod error;

// Re-export main types for convenience
pub use config::{
    AnalyzerConfig, Config, DatabaseConfig, MergeStrategy, RefactorConfig, ScopeAlias,
};
pub use database::{
    LookupOptions, RenameDatabase, RenameTable, Resolution, ScopeTables, ALL_SCOPE,
};
pub use error::{Error, Result, ResultExt};
