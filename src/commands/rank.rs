//! The `rank` command: run the full scoring pipeline.

use crate::aggregate::{ULTIMATE_SCORE, create_ultimate_score};
use crate::config::Config;
use crate::ranking::{RankedEntity, distinct_categories, flag_top_per_category, top_n};
use crate::reports::{RankingSummary, generate_console, generate_json};
use crate::scoring::apply_all;
use crate::table::{EntityTable, load_csv, save_csv};
use crate::preprocess;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for `player-rank rank`.
#[derive(Debug, Clone, Args)]
pub struct RankArgs {
    /// Input CSV file.
    #[arg(long)]
    pub input: PathBuf,

    /// Directory for the enriched table and the JSON summary.
    #[arg(long)]
    pub out: PathBuf,

    /// Configuration file; the embedded default is used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the pipeline: preprocess, score, aggregate, flag, report.
pub fn process_rankings(args: &RankArgs, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config()?,
    };
    for warning in config.validate() {
        log::warn!("{warning}");
    }

    let table = load_csv(&args.input)?;
    let table = run_pipeline(table, &config)?;

    let summary = summarize(&table, &config)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory {}", args.out.display()))?;
    save_csv(&table, &args.out.join("ranked.csv"))?;

    let json_path = args.out.join("summary.json");
    let mut json_file = std::fs::File::create(&json_path)
        .with_context(|| format!("failed to create {}", json_path.display()))?;
    generate_json(&mut json_file, &summary)?;

    generate_console(out, &summary)?;
    Ok(())
}

/// The engine itself, independent of any file I/O: clean the base columns,
/// append every score column, blend the ultimate score, and flag the
/// per-category leaders.
pub fn run_pipeline(table: EntityTable, config: &Config) -> Result<EntityTable> {
    let base_columns = vec![
        config.columns.base_a.clone(),
        config.columns.base_b.clone(),
    ];

    let table = preprocess::coerce_numeric(table, &base_columns)?;
    let table = preprocess::fill_missing_with_mean(table, &base_columns)?;
    let table = preprocess::standardize(table, &base_columns)?;

    let table = apply_all(
        table,
        &config.columns.base_a,
        &config.columns.base_b,
        &config.strategies,
    )?;

    let table = create_ultimate_score(table, &config.weights)?;

    match &config.columns.category {
        Some(category_column) => flag_top_per_category(
            table,
            ULTIMATE_SCORE,
            category_column,
            config.report.category_top_k,
        ),
        None => Ok(table),
    }
}

/// Assemble the overall and per-category top-N rankings.
pub fn summarize(table: &EntityTable, config: &Config) -> Result<RankingSummary> {
    let overall = top_n(
        table,
        &config.columns.name,
        ULTIMATE_SCORE,
        config.report.top_n,
        None,
    )?;

    let mut by_category: Vec<(String, Vec<RankedEntity>)> = Vec::new();
    if let Some(category_column) = &config.columns.category {
        for category in distinct_categories(table, category_column)? {
            let entries = top_n(
                table,
                &config.columns.name,
                ULTIMATE_SCORE,
                config.report.top_n,
                Some((category_column, &category)),
            )?;
            by_category.push((category, entries));
        }
    }

    Ok(RankingSummary {
        score_column: ULTIMATE_SCORE.to_string(),
        overall,
        by_category,
    })
}
