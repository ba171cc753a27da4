//! # repometer
//!
//! **CLI Binary**
//!
//! This is the entry point for the `repometer` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load configuration
//! * Initialize logging
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod commands;
mod error_hints;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use repometer_config::{Cli, TomlConfig};

/// Entry point used by the `repometer` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.global);

    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let config = TomlConfig::discover(cli.global.config.as_deref(), &cwd)?;
    commands::dispatch(cli, &config)
}

/// Render a fatal error with its cause chain and any hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
