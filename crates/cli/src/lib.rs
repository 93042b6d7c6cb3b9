//! Library interface for the hdlrefactor CLI
//!
//! This module exposes the subcommand implementations for integration testing
//! while keeping argument parsing and logging setup in main.rs.

pub mod commands;

// Re-export commonly needed types for tests
pub use anyhow::Result;
pub use hdlrefactor_core::config::Config;
pub use hdlrefactor_refactor::{Pass, RefactorStats};
