mod value_iteration;
pub use value_iteration::*;
mod values;
pub use values::*;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::basics::Coord;
use crate::config::EvalConfig;
use crate::error::Result;
use crate::grid::{Grid, ObstacleSet};
use crate::policy::Policy;

/// One sweep per `next()`, yielding the largest change of that sweep.
pub trait Evaluator<'a>: Iterator<Item = f64> {
  fn new(grid: &'a Grid, policy: &'a Policy, config: &'a EvalConfig) -> Result<Self>
  where
    Self: Sized;
  fn get_values(&self) -> &ValueTable;
  fn iterations(&self) -> usize;
  fn converged(&self) -> bool;
}

/// Final state of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
  pub values: ValueTable,
  pub iterations: usize,
  /// Largest change in the last sweep
  pub delta: f64,
  /// `false` when the iteration cap stopped the loop
  pub converged: bool,
}

/// Evaluates `policy` with the default constants.
pub fn evaluate_policy(size: usize, policy: &Policy, obstacles: &ObstacleSet) -> Result<Evaluation> {
  let grid = Grid::new(size, obstacles.iter().copied())?;
  evaluate_with(&grid, policy, &EvalConfig::default())
}

pub fn evaluate_with(grid: &Grid, policy: &Policy, config: &EvalConfig) -> Result<Evaluation> {
  Ok(run(SyncEvaluator::new(grid, policy, config)?))
}

/// Evaluates starting from `initial` instead of the all-zero table.
pub fn evaluate_from(grid: &Grid, policy: &Policy, config: &EvalConfig, initial: ValueTable) -> Result<Evaluation> {
  Ok(run(SyncEvaluator::with_initial(grid, policy, config, initial)?))
}

fn run<'a, E: Evaluator<'a>>(mut evaluator: E) -> Evaluation {
  let delta = evaluator.by_ref().fold(0.0, |_, delta| delta);
  let iterations = evaluator.iterations();
  let converged = evaluator.converged();
  if converged {
    info!("converged after {} iterations", iterations);
  } else {
    warn!("stopped at the iteration cap ({}) with delta {}", iterations, delta);
  }
  Evaluation { values: evaluator.get_values().clone(), iterations, delta, converged }
}

impl Evaluation {
  pub fn value(&self, coord: Coord) -> Option<f64> {
    self.values.get(coord)
  }
}
