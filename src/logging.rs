// File: ./src/logging.rs
//! File logging for the terminal UI.
//!
//! The terminal belongs to the UI while it runs, so log lines go to
//! `pocketbook.log` in the cache directory instead of stderr.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Installs the global file logger and returns the log file path.
/// Fails if a logger is already installed.
pub fn init_file_logger(ctx: &dyn AppContext, level: LevelFilter) -> Result<PathBuf> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file).context("Logger already initialised")?;
    log::info!(
        "pocketbook v{} started, logging at {}",
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(path)
}
