use gridvalue::config::*;
use gridvalue::evaluator::*;
use gridvalue::grid::Grid;
use gridvalue::policy::*;

use anyhow::{bail, ensure};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Check that evaluation is deterministic and that a converged table is a fixed point.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side length of the square grid
    #[arg(long)]
    size: usize,

    /// Seed for policy generation
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// TOML file overriding the evaluation constants
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  let config = Config::setup(args.config.as_deref())?;

  let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
  let (policy, obstacles) = generate_policy(args.size, None, &mut rng)?;
  let grid = Grid::new(args.size, obstacles.iter().copied())?;
  eprintln!("policy:\n{}", policy);

  let first = evaluate_with(&grid, &policy, &config.evaluation)?;
  let second = evaluate_with(&grid, &policy, &config.evaluation)?;
  eprintln!("iterations: {}, converged: {}, delta: {}", first.iterations, first.converged, first.delta);

  for coord in grid.coords() {
    let (v1, v2) = (first.value(coord), second.value(coord));
    if v1.map(f64::to_bits) != v2.map(f64::to_bits) {
      bail!("value mismatch at {}: {:?} vs {:?}", coord, v1, v2);
    }
  }
  eprintln!("values match");

  if !first.converged {
    eprintln!("not converged within {} iterations, skipping the fixed-point check", config.evaluation.max_iter);
    return Ok(());
  }
  let rerun = evaluate_from(&grid, &policy, &config.evaluation, first.values.clone())?;
  ensure!(rerun.iterations == 1 && rerun.delta == 0.0, "re-running a converged table changed it by {}", rerun.delta);
  ensure!(rerun.values == first.values, "re-running a converged table changed it");
  eprintln!("converged table is a fixed point");
  Ok(())
}
