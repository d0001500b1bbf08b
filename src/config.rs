// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::cli::CliOptions;
use crate::context::AppContext;
use crate::controller::{DEFAULT_COPIES, DEFAULT_SLICE_AT, PhoneBook};
use crate::row::CommitRule;
use crate::storage::FileStore;
use anyhow::{Error, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_slice_at() -> usize {
    DEFAULT_SLICE_AT
}
fn default_copies() -> usize {
    DEFAULT_COPIES
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Rows per printed column; the book holds twice as many entries.
    #[serde(default = "default_slice_at")]
    pub slice_at: usize,
    /// Printed copies per page.
    #[serde(default = "default_copies")]
    pub copies: usize,
    #[serde(default)]
    pub validation: CommitRule,
    /// Program (plus arguments) that receives the printable page path as its last
    /// argument, e.g. `["lp"]` or `["xdg-open"]`. Empty: only write the page.
    #[serde(default)]
    pub print_command: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slice_at: DEFAULT_SLICE_AT,
            copies: DEFAULT_COPIES,
            validation: CommitRule::default(),
            print_command: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config.normalized())
    }

    /// Loads the config, writing the defaults on first run.
    /// Any error other than a missing file is returned as-is.
    pub fn load_or_init(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                let cfg = Self::default();
                // Runs before the file logger exists, so report on stderr.
                if let Err(e) = cfg.save(ctx) {
                    eprintln!("Warning: could not write default config: {:#}", e);
                }
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether `err` means the config file simply does not exist yet.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        FileStore::save(&path, toml_str)
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    /// Command-line flags win over the file for this session only.
    pub fn apply_overrides(&mut self, options: &CliOptions) {
        if let Some(copies) = options.copies {
            self.copies = copies;
        }
        if let Some(slice_at) = options.slice_at {
            self.slice_at = slice_at;
        }
        if let Some(rule) = options.validation {
            self.validation = rule;
        }
        *self = std::mem::take(self).normalized();
    }

    fn normalized(mut self) -> Self {
        self.slice_at = self.slice_at.max(1);
        self.copies = self.copies.max(1);
        self
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn build_phone_book(&self) -> PhoneBook {
        PhoneBook::new(self.slice_at, self.copies)
    }
}
