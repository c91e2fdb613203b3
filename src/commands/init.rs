//! The `init` command: write a starter configuration file.

use crate::config::DEFAULT_CONFIG_TOML;
use anyhow::{Context, Result, bail};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for `player-rank init`.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Where to write the configuration file.
    #[arg(long, default_value = "player-rank.toml")]
    pub path: PathBuf,
}

/// Write the built-in default configuration, refusing to clobber an
/// existing file.
pub fn init_config(args: &InitArgs, out: &mut impl Write) -> Result<()> {
    if args.path.exists() {
        bail!("{} already exists; delete it first", args.path.display());
    }

    std::fs::write(&args.path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write {}", args.path.display()))?;

    writeln!(out, "wrote {}", args.path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_init_writes_a_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player-rank.toml");
        let args = InitArgs { path: path.clone() };

        let mut out = Vec::new();
        init_config(&args, &mut out).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default_config().unwrap());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player-rank.toml");
        std::fs::write(&path, "# custom").unwrap();

        let args = InitArgs { path: path.clone() };
        let mut out = Vec::new();
        assert!(init_config(&args, &mut out).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# custom");
    }
}
