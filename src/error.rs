//! Error types for gridvalue

use crate::basics::Coord;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Grid size is zero, or too small to sample `n - 2` obstacles
  #[error("invalid grid size {size}: {reason}")]
  InvalidGridSize { size: usize, reason: &'static str },

  /// Caller-supplied obstacle lies outside the grid
  #[error("obstacle {coord} is outside the {size}x{size} grid")]
  InvalidObstacleCoordinate { coord: Coord, size: usize },

  /// Policy or value table was built for a different grid
  #[error("table covers a {actual}x{actual} grid, expected {expected}x{expected}")]
  PolicyShapeMismatch { expected: usize, actual: usize },

  /// Policy marks a free cell as blocked
  #[error("policy has no action for free cell {coord}")]
  PolicyMismatch { coord: Coord },

  #[error("cannot parse coordinate {0:?}, expected `row,col`")]
  InvalidCoord(String),

  #[error("configuration error: {0}")]
  Config(String),
}
