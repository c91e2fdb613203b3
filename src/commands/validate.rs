//! The `validate` command: check a configuration file.

use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for `player-rank validate`.
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Configuration file to check.
    #[arg(long, default_value = "player-rank.toml")]
    pub config: PathBuf,
}

/// Load the configuration, report soft warnings, and fail on hard errors.
pub fn validate_config(args: &ValidateArgs, out: &mut impl Write) -> Result<()> {
    let config = Config::load(&args.config)?;

    let warnings = config.validate();
    if warnings.is_empty() {
        writeln!(out, "{} is valid", args.config.display())?;
    } else {
        writeln!(
            out,
            "{} is valid, with {} warning(s):",
            args.config.display(),
            warnings.len()
        )?;
        for warning in &warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    Ok(())
}
