//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use std::path::Path;

use super::{default_config_path, Config};

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// A missing file is not an error, every value then comes from the
    /// defaults and the environment. Environment variables are prefixed with
    /// `HDLREFACTOR_` and use double underscores for nested values. For example:
    /// - `HDLREFACTOR_DATABASE__FIX_CASE=false`
    /// - `HDLREFACTOR_ANALYZER__BLACKLIST=rst_pol_g,clk_freq_g`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("HDLREFACTOR")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("analyzer.blacklist")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (`./hdlrefactor.toml` or custom --config path)
    /// 3. Environment variables (HDLREFACTOR_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) if !p.exists() => {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    p.display()
                )))
            }
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };
        Self::from_file(&path)
    }
}
