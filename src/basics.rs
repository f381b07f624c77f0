use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// A cell of the grid, `(row, col)`.
#[derive(Debug, Serialize, Deserialize, Hash, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Coord(pub usize, pub usize);

impl std::fmt::Display for Coord {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "({}, {})", self.0, self.1)
  }
}

// accepts `row,col` with optional whitespace and parentheses
impl FromStr for Coord {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
    let (row, col) = trimmed.split_once(',').ok_or_else(|| Error::InvalidCoord(s.to_string()))?;
    let row = row.trim().parse::<usize>().map_err(|_| Error::InvalidCoord(s.to_string()))?;
    let col = col.trim().parse::<usize>().map_err(|_| Error::InvalidCoord(s.to_string()))?;
    Ok(Coord(row, col))
  }
}

#[derive(Debug, Hash, Eq, PartialEq, Serialize, Deserialize, Copy, Clone, Ord, PartialOrd)]
pub enum Action {
  Up = 0,
  Down = 1,
  Left = 2,
  Right = 3
}

impl Action {
  /// Row and column offset of one step in this direction.
  pub fn offset(self) -> (isize, isize) {
    match self {
      Action::Up => (-1, 0),
      Action::Down => (1, 0),
      Action::Left => (0, -1),
      Action::Right => (0, 1),
    }
  }

  pub fn arrow(self) -> char {
    match self {
      Action::Up => '↑',
      Action::Down => '↓',
      Action::Left => '←',
      Action::Right => '→',
    }
  }
}

pub const ACTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

pub const BLOCKED_MARK: char = '■';

/// What the policy says for one cell.
#[derive(Debug, Hash, Eq, PartialEq, Serialize, Deserialize, Copy, Clone)]
pub enum Directive {
  Move(Action),
  Blocked,
}

impl Directive {
  pub fn action(self) -> Option<Action> {
    match self {
      Directive::Move(action) => Some(action),
      Directive::Blocked => None,
    }
  }
}

impl std::fmt::Display for Directive {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Directive::Move(action) => write!(f, "{}", action.arrow()),
      Directive::Blocked => write!(f, "{}", BLOCKED_MARK),
    }
  }
}
