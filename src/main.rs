//! Wolfgrid - Entry Point
//!
//! Reads an initial board file, runs the simulation across the requested
//! number of workers, and prints the occupied cells of the final board.

use clap::Parser;
use std::path::PathBuf;

use wolfgrid::core::config::RuleConfig;
use wolfgrid::core::error::Result;
use wolfgrid::engine::run_simulation;
use wolfgrid::io;

/// Distributed predator/prey cellular automaton
#[derive(Parser, Debug)]
#[command(name = "wolfgrid")]
#[command(about = "Simulate wolves and squirrels on a partitioned grid")]
struct Args {
    /// Board file: first line is the grid size, then `row col symbol`
    /// lines (w/s/t/i/$)
    board: PathBuf,

    /// Number of generations to simulate
    generations: u32,

    /// Wolf breeding period, in generations (default 5)
    #[arg(long)]
    wolf_breeding: Option<i32>,

    /// Squirrel breeding period, in generations (default 5)
    #[arg(long)]
    squirrel_breeding: Option<i32>,

    /// Wolf starvation period, in generations (default 5)
    #[arg(long)]
    wolf_starvation: Option<i32>,

    /// TOML file with the three rule periods; explicit period flags win
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Worker count (defaults to the available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

impl Args {
    fn rule_config(&self) -> Result<RuleConfig> {
        let mut rules = match &self.rules {
            Some(path) => RuleConfig::from_toml_file(path)?,
            None => RuleConfig::default(),
        };
        if let Some(period) = self.wolf_breeding {
            rules.wolf_breeding_period = period;
        }
        if let Some(period) = self.squirrel_breeding {
            rules.squirrel_breeding_period = period;
        }
        if let Some(period) = self.wolf_starvation {
            rules.wolf_starvation_period = period;
        }
        Ok(rules)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("wolfgrid=info")
        .init();

    let args = Args::parse();
    let rules = args.rule_config()?;
    let layout = io::read_board(&args.board)?;
    let workers = args
        .workers
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(1);

    let cells = run_simulation(&layout, rules, args.generations, workers)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&cells)?);
    } else {
        print!("{}", io::format_text(&cells));
    }
    Ok(())
}
