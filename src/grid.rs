use itertools::iproduct;
use num_integer::Integer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::basics::{Action, Coord};
use crate::error::{Error, Result};

pub type ObstacleSet = BTreeSet<Coord>;

/// Reward for a move that lands on a free cell.
pub const STEP_REWARD: f64 = 0.0;
/// Reward for bumping into an obstacle or the border.
pub const BLOCKED_REWARD: f64 = -1.0;

/// An n×n grid world with a fixed set of impassable cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
  size: usize,
  obstacles: ObstacleSet,
}

/// Outcome of applying one action to one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
  pub next: Coord,
  pub reward: f64,
}

impl Grid {
  /// Builds a grid, rejecting a zero or overflowing size and obstacles
  /// outside the grid.
  pub fn new(size: usize, obstacles: impl IntoIterator<Item = Coord>) -> Result<Self> {
    if size == 0 {
      return Err(Error::InvalidGridSize { size, reason: "grid must have at least one cell" });
    }
    if size.checked_mul(size).is_none() {
      return Err(Error::InvalidGridSize { size, reason: "cell count overflows" });
    }
    let obstacles = obstacles.into_iter().collect::<ObstacleSet>();
    if let Some(&coord) = obstacles.iter().find(|&&coord| coord.0 >= size || coord.1 >= size) {
      return Err(Error::InvalidObstacleCoordinate { coord, size });
    }
    Ok(Grid { size, obstacles })
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn obstacles(&self) -> &ObstacleSet {
    &self.obstacles
  }

  pub fn is_obstacle(&self, coord: Coord) -> bool {
    self.obstacles.contains(&coord)
  }

  pub fn contains(&self, coord: Coord) -> bool {
    coord.0 < self.size && coord.1 < self.size
  }

  /// Cell at row-major position `index`.
  pub fn coord(&self, index: usize) -> Coord {
    let (row, col) = index.div_rem(&self.size);
    Coord(row, col)
  }

  /// All cells in row-major order.
  pub fn coords(&self) -> impl Iterator<Item = Coord> {
    iproduct!(0..self.size, 0..self.size).map(|(row, col)| Coord(row, col))
  }

  pub fn free_cells(&self) -> impl Iterator<Item = Coord> + '_ {
    self.coords().filter(move |&coord| !self.is_obstacle(coord))
  }

  /// The neighbour one step away, if it is on the grid.
  pub fn neighbour(&self, coord: Coord, action: Action) -> Option<Coord> {
    let (dr, dc) = action.offset();
    let row = coord.0.checked_add_signed(dr)?;
    let col = coord.1.checked_add_signed(dc)?;
    let target = Coord(row, col);
    self.contains(target).then_some(target)
  }

  /// Deterministic move: off-grid or into an obstacle stays put with
  /// `BLOCKED_REWARD`, anything else moves with `STEP_REWARD`.
  pub fn transition(&self, coord: Coord, action: Action) -> Transition {
    match self.neighbour(coord, action) {
      Some(next) if !self.is_obstacle(next) => Transition { next, reward: STEP_REWARD },
      _ => Transition { next: coord, reward: BLOCKED_REWARD },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_zero_size() {
    assert!(matches!(Grid::new(0, []), Err(Error::InvalidGridSize { size: 0, .. })));
  }

  #[test]
  fn rejects_sizes_whose_cell_count_overflows() {
    let size = usize::MAX / 2;
    assert!(matches!(Grid::new(size, []), Err(Error::InvalidGridSize { .. })));
  }

  #[test]
  fn rejects_out_of_range_obstacles() {
    let err = Grid::new(3, [Coord(0, 0), Coord(1, 3)]).unwrap_err();
    match err {
      Error::InvalidObstacleCoordinate { coord, size } => {
        assert_eq!(coord, Coord(1, 3));
        assert_eq!(size, 3);
      }
      other => panic!("unexpected error {:?}", other),
    }
  }

  #[test]
  fn coord_follows_row_major_order() {
    let grid = Grid::new(4, []).unwrap();
    for (i, coord) in grid.coords().enumerate() {
      assert_eq!(grid.coord(i), coord);
    }
    assert_eq!(grid.coords().count(), 16);
  }

  #[test]
  fn transitions() {
    let grid = Grid::new(3, [Coord(1, 1)]).unwrap();
    assert_eq!(grid.transition(Coord(0, 0), Action::Up), Transition { next: Coord(0, 0), reward: -1.0 });
    assert_eq!(grid.transition(Coord(0, 0), Action::Left), Transition { next: Coord(0, 0), reward: -1.0 });
    assert_eq!(grid.transition(Coord(0, 1), Action::Down), Transition { next: Coord(0, 1), reward: -1.0 });
    assert_eq!(grid.transition(Coord(0, 0), Action::Right), Transition { next: Coord(0, 1), reward: 0.0 });
    assert_eq!(grid.transition(Coord(2, 2), Action::Up), Transition { next: Coord(1, 2), reward: 0.0 });
    assert_eq!(grid.transition(Coord(2, 2), Action::Down), Transition { next: Coord(2, 2), reward: -1.0 });
  }

  #[test]
  fn duplicate_obstacles_collapse() {
    let grid = Grid::new(3, [Coord(0, 1), Coord(0, 1)]).unwrap();
    assert_eq!(grid.obstacles().len(), 1);
    assert_eq!(grid.free_cells().count(), 8);
  }
}
