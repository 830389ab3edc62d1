//! CLI configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`--config`, or `radium/radium.toml` under the platform config dir if it
//! exists), `RADIUM_*` environment variables, then command-line flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use radium_core::constants::NetworkType;
use serde::Deserialize;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Structured JSON, one object per line.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Network whose checkpoint table is consulted.
    pub network: NetworkType,
    /// Log filter (e.g. "info", "radium_consensus=debug").
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("radium").join("radium.toml"))
    }

    /// Load from defaults, `path` (or the default location), and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Like [`load`](Self::load) but reads `RADIUM_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("network", NetworkType::default().as_str())?
            .set_default("log_level", "info")?
            .set_default("log_format", "text")?;

        builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => match Self::default_path() {
                Some(p) => builder.add_source(File::from(p).required(false)),
                None => builder,
            },
        };

        let settings = builder
            .add_source(Environment::with_prefix("RADIUM").source(env))
            .build()
            .context("failed to read configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(
        &mut self,
        testnet: bool,
        log_level: Option<String>,
        log_format: Option<LogFormat>,
    ) {
        if testnet {
            self.network = NetworkType::Testnet;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
    }
}
