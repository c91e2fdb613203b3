//! Machine-readable ranking summary.

use crate::reports::RankingSummary;
use anyhow::{Context, Result};
use std::io::Write;

/// Write the summary as pretty-printed JSON.
pub fn generate(out: &mut impl Write, summary: &RankingSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary).context("failed to serialize summary")?;
    writeln!(out)?;
    Ok(())
}
