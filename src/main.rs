//! A tool to score and rank players from match data.

use clap::{Parser, Subcommand};
use player_rank::commands::{
    InitArgs, RankArgs, ValidateArgs, init_config, process_rankings, validate_config,
};
use std::io::stdout;

#[derive(Debug, Parser)]
#[command(name = "player-rank", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score, aggregate, and rank the players in a CSV file.
    Rank(RankArgs),

    /// Write a starter configuration file.
    Init(InitArgs),

    /// Check a configuration file for errors and warnings.
    Validate(ValidateArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut out = stdout();
    let result = match &cli.command {
        Command::Rank(args) => process_rankings(args, &mut out),
        Command::Init(args) => init_config(args, &mut out),
        Command::Validate(args) => validate_config(args, &mut out),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
