//! Line-oriented symbol renaming for VHDL sources
//!
//! This crate holds the passes of the refactoring toolchain:
//!
//! - **Analyzer**: harvests declared generics and ports per entity
//! - **Merge**: pairs the declarations of two library versions into a
//!   persisted rename table
//! - **Rewriters**: declaration, instantiation, free-symbol and simulator
//!   script renames, each a single pass over the lines of a file
//! - **Orchestrator**: applies the passes to whole source trees
//!
//! None of this parses VHDL. Lines are matched against a handful of patterns
//! and anything unrecognised is passed through unchanged.

pub mod analyzer;
pub mod markers;
pub mod merge;
pub mod orchestrator;
pub mod rewriters;
pub mod text;
pub mod walk;

pub use analyzer::{DeclarationAnalyzer, DeclarationSets};
pub use markers::{MarkerAction, MarkerTable, ScopeCursor};
pub use merge::{default_seed, merge_name_aware, merge_positional, DatabaseBuilder};
pub use orchestrator::{RefactorStats, Refactorer};
pub use rewriters::{
    ConfigRewriter, DeclarationRewriter, InstantiationRewriter, LineRewriter, Pass, Rewriters,
    SymbolRewriter,
};
