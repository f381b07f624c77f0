use serde::{Deserialize, Serialize};

use crate::basics::Coord;
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Per-cell state values, row-major. `None` marks an obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
  size: usize,
  values: Vec<Option<f64>>,
}

impl ValueTable {
  /// `0.0` on free cells, undefined on obstacles.
  pub fn new(grid: &Grid) -> Self {
    ValueTable {
      size: grid.size(),
      values: grid.coords().map(|coord| (!grid.is_obstacle(coord)).then_some(0.0)).collect(),
    }
  }

  pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
    let size = rows.len();
    if let Some(row) = rows.iter().find(|row| row.len() != size) {
      return Err(Error::PolicyShapeMismatch { expected: size, actual: row.len() });
    }
    Ok(ValueTable { size, values: rows.into_iter().flatten().collect() })
  }

  pub(crate) fn from_raw(size: usize, values: Vec<Option<f64>>) -> Self {
    debug_assert_eq!(values.len(), size * size);
    ValueTable { size, values }
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn get(&self, coord: Coord) -> Option<f64> {
    self.values[coord.0 * self.size + coord.1]
  }

  pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
    self.values.iter().copied()
  }

  pub fn rows(&self) -> Vec<Vec<Option<f64>>> {
    self.values.chunks(self.size.max(1)).map(|row| row.to_vec()).collect()
  }
}
