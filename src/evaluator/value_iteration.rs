use super::*;
use average::{Estimate, Max};
use log::debug;

use crate::error::Error;

/// Synchronous policy evaluation: every sweep reads only the previous
/// sweep's table and replaces it as a whole.
pub struct SyncEvaluator<'a> {
  grid: &'a Grid,
  policy: &'a Policy,
  config: &'a EvalConfig,
  values: ValueTable,
  iterations: usize,
  converged: bool,
}

impl<'a> Evaluator<'a> for SyncEvaluator<'a> {
  fn new(grid: &'a Grid, policy: &'a Policy, config: &'a EvalConfig) -> Result<Self> {
    Self::with_initial(grid, policy, config, ValueTable::new(grid))
  }
  fn get_values(&self) -> &ValueTable {
    &self.values
  }
  fn iterations(&self) -> usize {
    self.iterations
  }
  fn converged(&self) -> bool {
    self.converged
  }
}

impl<'a> SyncEvaluator<'a> {
  /// Starts from `initial`. Obstacle entries of `initial` are reset to
  /// undefined; an undefined free cell is read as `0.0`.
  pub fn with_initial(grid: &'a Grid, policy: &'a Policy, config: &'a EvalConfig, initial: ValueTable) -> Result<Self> {
    config.validate()?;
    policy.check(grid)?;
    if initial.size() != grid.size() {
      return Err(Error::PolicyShapeMismatch { expected: grid.size(), actual: initial.size() });
    }
    let values = grid
      .coords()
      .map(|coord| if grid.is_obstacle(coord) { None } else { initial.get(coord) })
      .collect();
    Ok(Self {
      grid,
      policy,
      config,
      values: ValueTable::from_raw(grid.size(), values),
      iterations: 0,
      converged: false,
    })
  }

  fn backup(&self, coord: Coord) -> Option<f64> {
    if self.grid.is_obstacle(coord) {
      return None;
    }
    let action = self.policy.action(coord)?;
    let transition = self.grid.transition(coord, action);
    let next_value = if self.grid.is_obstacle(transition.next) {
      0.0
    } else {
      self.values.get(transition.next).unwrap_or(0.0)
    };
    Some(self.config.round(transition.reward + self.config.gamma * next_value))
  }
}

impl<'a> Iterator for SyncEvaluator<'a> {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.converged || self.iterations >= self.config.max_iter {
      return None;
    }
    let mut delta = Max::from_value(0.);
    let new_values = self
      .grid
      .coords()
      .map(|coord| {
        let new_value = self.backup(coord);
        if let Some(value) = new_value {
          let old_value = self.values.get(coord).unwrap_or(0.0);
          delta.add((value - old_value).abs());
        }
        new_value
      })
      .collect::<Vec<_>>();
    let delta = delta.max();
    self.values = ValueTable::from_raw(self.grid.size(), new_values);
    self.iterations += 1;
    self.converged = delta < self.config.threshold;
    debug!("iteration {}: delta {}", self.iterations, delta);
    Some(delta)
  }
}
