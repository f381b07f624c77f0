use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::basics::{Coord, Directive};
use crate::config::EvalConfig;
use crate::error::Result;
use crate::evaluator::{evaluate_with, Evaluation};
use crate::grid::{Grid, ObstacleSet};
use crate::policy::{generate_policy, Policy};

/// Everything the caller chooses for one run. Passed explicitly on every
/// call; nothing is remembered between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
  pub size: usize,
  /// `None` samples `size - 2` obstacles
  pub obstacles: Option<Vec<Coord>>,
  pub config: EvalConfig,
}

impl RunRequest {
  pub fn new(size: usize) -> Self {
    RunRequest { size, obstacles: None, config: EvalConfig::default() }
  }
}

/// Value and policy matrices of one run, plus how the loop ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
  pub size: usize,
  pub obstacles: ObstacleSet,
  pub value_matrix: Vec<Vec<Option<f64>>>,
  pub policy_matrix: Vec<Vec<Directive>>,
  pub iterations: usize,
  pub converged: bool,
}

impl RunOutcome {
  fn new(policy: &Policy, obstacles: ObstacleSet, evaluation: Evaluation) -> Self {
    RunOutcome {
      size: policy.size(),
      obstacles,
      value_matrix: evaluation.values.rows(),
      policy_matrix: policy.rows(),
      iterations: evaluation.iterations,
      converged: evaluation.converged,
    }
  }
}

/// Generates a random policy, evaluates it, and returns both as matrices.
pub fn generate_value_policy_matrices<R: Rng + ?Sized>(request: &RunRequest, rng: &mut R) -> Result<RunOutcome> {
  request.config.validate()?;
  let (policy, obstacles) = generate_policy(request.size, request.obstacles.as_deref(), rng)?;
  let grid = Grid::new(request.size, obstacles.iter().copied())?;
  let evaluation = evaluate_with(&grid, &policy, &request.config)?;
  Ok(RunOutcome::new(&policy, obstacles, evaluation))
}

/// `runs` independent runs; run `r` draws from a generator seeded with
/// `seed + r`, so the output does not depend on scheduling.
pub fn evaluate_batch(request: &RunRequest, seed: u64, runs: usize) -> Result<Vec<RunOutcome>> {
  info!("evaluating {} runs on a {}x{} grid", runs, request.size, request.size);
  (0..runs as u64)
    .into_par_iter()
    .map(|r| {
      let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(r));
      generate_value_policy_matrices(request, &mut rng)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;

  #[test]
  fn matrices_are_square_and_total() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let outcome = generate_value_policy_matrices(&RunRequest::new(7), &mut rng).unwrap();
    assert_eq!(outcome.value_matrix.len(), 7);
    assert_eq!(outcome.policy_matrix.len(), 7);
    assert_eq!(outcome.obstacles.len(), 5);
    for (i, (values, directives)) in outcome.value_matrix.iter().zip(&outcome.policy_matrix).enumerate() {
      assert_eq!(values.len(), 7);
      assert_eq!(directives.len(), 7);
      for (j, (value, directive)) in values.iter().zip(directives).enumerate() {
        let blocked = outcome.obstacles.contains(&Coord(i, j));
        assert_eq!(value.is_none(), blocked);
        assert_eq!(*directive == Directive::Blocked, blocked);
      }
    }
    assert!(outcome.iterations <= 50);
  }

  #[test]
  fn batch_matches_sequential_runs() {
    let request = RunRequest::new(5);
    let batch = evaluate_batch(&request, 1000, 6).unwrap();
    assert_eq!(batch.len(), 6);
    for (r, outcome) in batch.iter().enumerate() {
      let mut rng = ChaCha8Rng::seed_from_u64(1000 + r as u64);
      assert_eq!(*outcome, generate_value_policy_matrices(&request, &mut rng).unwrap());
    }
  }

  #[test]
  fn invalid_request_has_no_partial_result() {
    let request = RunRequest { obstacles: Some(vec![Coord(9, 9)]), ..RunRequest::new(4) };
    let result = evaluate_batch(&request, 0, 3);
    assert!(matches!(result, Err(Error::InvalidObstacleCoordinate { .. })));
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(matches!(
      generate_value_policy_matrices(&RunRequest::new(1), &mut rng),
      Err(Error::InvalidGridSize { size: 1, .. })
    ));
  }
}
