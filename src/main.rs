use gridvalue::basics::Coord;
use gridvalue::config::Config;
use gridvalue::pipeline::*;
use gridvalue::printer::*;

use anyhow::Context;
use clap::Parser;

/// Evaluate a random movement policy on a grid world with obstacles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side length of the square grid
    #[arg(long)]
    size: usize,

    /// Obstacle cell as `row,col`; repeat for more. Sampled when omitted.
    #[arg(long = "obstacle")]
    obstacles: Vec<Coord>,

    /// Seed for policy generation
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent runs
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    runs: u64,

    /// TOML file overriding the evaluation constants
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Print the outcome as JSON
    #[arg(long, action)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  let config = Config::setup(args.config.as_deref())?;

  let request = RunRequest {
    size: args.size,
    obstacles: (!args.obstacles.is_empty()).then_some(args.obstacles),
    config: config.evaluation,
  };
  let seed = args.seed.unwrap_or_else(rand::random);
  log::info!("seed {}", seed);

  let outcomes = evaluate_batch(&request, seed, args.runs as usize).context("evaluation failed")?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    return Ok(());
  }
  for (i, outcome) in outcomes.iter().enumerate() {
    if outcomes.len() > 1 {
      println!("== run {} (seed {})", i, seed.wrapping_add(i as u64));
    }
    MatrixPrinter::print(outcome);
    println!();
    SummaryPrinter::print(outcome);
  }
  Ok(())
}
