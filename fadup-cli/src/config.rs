//! Configuration handling for fadup
//!
//! Supports loading I/O settings from a fadup.toml file with CLI argument overrides.

use anyhow::{Context, Result};
use fadup_core::IoOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fadup.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// Read/write buffer size in bytes
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Gzip level for `.gz` outputs (0-9)
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

fn default_buffer_capacity() -> usize { IoOptions::default().buffer_capacity }
fn default_compression_level() -> u32 { IoOptions::default().compression_level }

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            compression_level: default_compression_level(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply command line overrides on top of the loaded values
    pub fn with_overrides(mut self, buffer_size: Option<usize>, compression_level: Option<u32>) -> Self {
        if let Some(size) = buffer_size {
            self.io.buffer_capacity = size;
        }
        if let Some(level) = compression_level {
            self.io.compression_level = level;
        }
        self
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.io.buffer_capacity == 0 {
            return Err(CliError::config("io.buffer_capacity must be greater than 0"));
        }
        if self.io.compression_level > 9 {
            return Err(CliError::config(format!(
                "io.compression_level must be between 0 and 9, got: {}",
                self.io.compression_level
            )));
        }
        Ok(())
    }

    pub fn io_options(&self) -> IoOptions {
        IoOptions {
            buffer_capacity: self.io.buffer_capacity,
            compression_level: self.io.compression_level,
        }
    }
}
