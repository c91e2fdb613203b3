//! Human-readable top-N report.

use crate::reports::RankingSummary;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

/// Write the overall and per-category rankings to `out`.
pub fn generate(out: &mut impl Write, summary: &RankingSummary) -> Result<()> {
    writeln!(
        out,
        "{} (by {})",
        format!("Top {} players", summary.overall.len()).bold(),
        summary.score_column.cyan()
    )?;
    write_entries(out, &summary.overall)?;

    for (category, entries) in &summary.by_category {
        writeln!(out)?;
        writeln!(out, "{}", format!("Top players: {category}").bold())?;
        if entries.is_empty() {
            writeln!(out, "  (none)")?;
        } else {
            write_entries(out, entries)?;
        }
    }

    Ok(())
}

fn write_entries(out: &mut impl Write, entries: &[crate::ranking::RankedEntity]) -> Result<()> {
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {:<24} {}",
            rank + 1,
            entry.name,
            format!("{:+.4}", entry.score).green()
        )?;
    }
    Ok(())
}
