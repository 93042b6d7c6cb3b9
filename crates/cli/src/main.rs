//! hdlrefactor CLI - VHDL library migration toolchain
//!
//! This binary builds rename databases from two versions of a library and
//! rewrites user sources against them.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use hdlrefactor::commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use hdlrefactor_core::config::Config;
use hdlrefactor_refactor::Pass;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hdlrefactor")]
#[command(about = "Rename generics, ports and functions across VHDL sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a rename database from an old and a new library tree
    BuildDb {
        /// Root of the library version being migrated from
        old_dir: PathBuf,
        /// Root of the library version being migrated to
        new_dir: PathBuf,
        /// JSON file the rename database is written to
        db_file: PathBuf,
        /// JSON rename table the merge starts from instead of the built-in one
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,
    },
    /// Rewrite every VHDL source below the given roots in place
    Refactor {
        /// Rename database
        #[arg(short, long, value_name = "FILE")]
        database: PathBuf,
        /// Simulator script whose generic overrides are renamed too
        #[arg(long, value_name = "FILE")]
        sim_config: Option<PathBuf>,
        /// Source trees
        #[arg(required = true)]
        roots: Vec<PathBuf>,
    },
    /// Run a single rename pass over one file
    Rewrite {
        /// Rename database
        #[arg(short, long, value_name = "FILE")]
        database: PathBuf,
        /// Pass to run
        #[arg(short, long, value_enum)]
        pass: PassArg,
        /// File to rewrite
        input: PathBuf,
        /// Output file, the input is rewritten in place when omitted
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the generics and ports every entity of a file declares
    Analyze {
        /// VHDL source
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PassArg {
    Declarations,
    Instantiations,
    Symbols,
    SimConfig,
}

impl From<PassArg> for Pass {
    fn from(pass: PassArg) -> Self {
        match pass {
            PassArg::Declarations => Pass::Declarations,
            PassArg::Instantiations => Pass::Instantiations,
            PassArg::Symbols => Pass::Symbols,
            PassArg::SimConfig => Pass::SimConfig,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::BuildDb {
            old_dir,
            new_dir,
            db_file,
            seed,
        } => {
            let config = load_config(cli.config.as_deref())?;
            commands::build_database(&old_dir, &new_dir, &db_file, seed.as_deref(), &config)?;
        }
        Commands::Refactor {
            database,
            sim_config,
            roots,
        } => {
            let config = load_config(cli.config.as_deref())?;
            commands::refactor(&database, sim_config.as_deref(), &roots, &config)?;
        }
        Commands::Rewrite {
            database,
            pass,
            input,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            commands::rewrite(&database, pass.into(), &input, output.as_deref(), &config)?;
        }
        Commands::Analyze { file } => {
            println!("{}", commands::analyze(&file)?);
        }
    }

    Ok(())
}

/// Initialize logging system
///
/// Logs go to stderr so that `analyze` output can be piped.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "{}={level},hdlrefactor_core={level},hdlrefactor_refactor={level}",
            env!("CARGO_PKG_NAME")
        ))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Load and validate configuration
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rewrite_pass() {
        let cli = Cli::try_parse_from([
            "hdlrefactor",
            "rewrite",
            "--database",
            "db.json",
            "--pass",
            "sim-config",
            "config.tcl",
        ])
        .unwrap();

        match cli.command {
            Commands::Rewrite { pass, output, .. } => {
                assert_eq!(Pass::from(pass), Pass::SimConfig);
                assert!(output.is_none());
            }
            _ => panic!("expected the rewrite command"),
        }
    }

    #[test]
    fn test_refactor_requires_a_root() {
        assert!(Cli::try_parse_from(["hdlrefactor", "refactor", "--database", "db.json"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hdlrefactor",
            "analyze",
            "top.vhd",
            "--verbose",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
