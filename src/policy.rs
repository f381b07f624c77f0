use itertools::Itertools;
use log::debug;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::basics::{Action, Coord, Directive, ACTIONS};
use crate::error::{Error, Result};
use crate::grid::{Grid, ObstacleSet};

/// A fixed directive for every cell of an n×n grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
  size: usize,
  directives: Vec<Directive>,
}

impl Policy {
  /// Obstacles get `Blocked`, every other cell gets `action(coord)`.
  pub fn from_fn(grid: &Grid, mut action: impl FnMut(Coord) -> Action) -> Self {
    let directives = grid
      .coords()
      .map(|coord| if grid.is_obstacle(coord) { Directive::Blocked } else { Directive::Move(action(coord)) })
      .collect();
    Policy { size: grid.size(), directives }
  }

  /// Takes a square matrix of directives as is.
  pub fn from_rows(rows: Vec<Vec<Directive>>) -> Result<Self> {
    let size = rows.len();
    if let Some(row) = rows.iter().find(|row| row.len() != size) {
      return Err(Error::PolicyShapeMismatch { expected: size, actual: row.len() });
    }
    Ok(Policy { size, directives: rows.into_iter().flatten().collect() })
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn get(&self, coord: Coord) -> Directive {
    self.directives[coord.0 * self.size + coord.1]
  }

  pub fn action(&self, coord: Coord) -> Option<Action> {
    self.get(coord).action()
  }

  pub fn rows(&self) -> Vec<Vec<Directive>> {
    self.directives.chunks(self.size.max(1)).map(|row| row.to_vec()).collect()
  }

  /// Checks that this policy fits `grid`: same size, and a direction on
  /// every free cell. Directions on obstacle cells are ignored.
  pub fn check(&self, grid: &Grid) -> Result<()> {
    if self.size != grid.size() {
      return Err(Error::PolicyShapeMismatch { expected: grid.size(), actual: self.size });
    }
    match grid.free_cells().find(|&coord| self.action(coord).is_none()) {
      Some(coord) => Err(Error::PolicyMismatch { coord }),
      None => Ok(()),
    }
  }
}

impl std::fmt::Display for Policy {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(
      f,
      "{}",
      self.directives.chunks(self.size.max(1)).map(|row| row.iter().join(" ")).join("\n")
    )
  }
}

/// Picks `size - 2` distinct cells uniformly at random.
pub fn sample_obstacles<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<ObstacleSet> {
  if size < 2 {
    return Err(Error::InvalidGridSize { size, reason: "need at least 2 to place size - 2 obstacles" });
  }
  let grid = Grid::new(size, [])?;
  Ok(index::sample(rng, size * size, size - 2).into_iter().map(|cell| grid.coord(cell)).collect())
}

/// Draws a uniformly random direction for every free cell.
///
/// When `obstacles` is `None`, `size - 2` obstacles are sampled first.
/// Supplied obstacles are checked against the grid before anything is drawn.
pub fn generate_policy<R: Rng + ?Sized>(
  size: usize,
  obstacles: Option<&[Coord]>,
  rng: &mut R,
) -> Result<(Policy, ObstacleSet)> {
  let obstacles = match obstacles {
    Some(given) => given.iter().copied().collect(),
    None => sample_obstacles(size, rng)?,
  };
  let grid = Grid::new(size, obstacles)?;
  let policy = Policy::from_fn(&grid, |_| ACTIONS[rng.gen_range(0..ACTIONS.len())]);
  debug!("generated policy for {}x{} grid with {} obstacles", size, size, grid.obstacles().len());
  Ok((policy, grid.obstacles().clone()))
}
