use average::Mean;
use itertools::Itertools;
use ordered_float::NotNan;

use crate::basics::{Coord, BLOCKED_MARK};
use crate::pipeline::RunOutcome;

pub trait Printer {
  fn render(outcome: &RunOutcome) -> String;
  fn print(outcome: &RunOutcome) {
    println!("{}", Self::render(outcome));
  }
}

/// Value and policy matrices side by side as plain text.
pub struct MatrixPrinter();

const CELL_WIDTH: usize = 7;

impl Printer for MatrixPrinter {
  fn render(outcome: &RunOutcome) -> String {
    let values = outcome
      .value_matrix
      .iter()
      .map(|row| {
        row
          .iter()
          .map(|value| match value {
            Some(v) => format!("{:>width$.2}", v, width = CELL_WIDTH),
            None => format!("{:>width$}", BLOCKED_MARK, width = CELL_WIDTH),
          })
          .join("")
      })
      .join("\n");
    let policy = outcome.policy_matrix.iter().map(|row| row.iter().join(" ")).join("\n");
    format!("Value matrix:\n{}\n\nPolicy matrix:\n{}", values, policy)
  }
}

/// One-paragraph numeric summary of a run.
pub struct SummaryPrinter();

impl Printer for SummaryPrinter {
  fn render(outcome: &RunOutcome) -> String {
    let cells = outcome
      .value_matrix
      .iter()
      .enumerate()
      .flat_map(|(i, row)| row.iter().enumerate().filter_map(move |(j, value)| Some((Coord(i, j), (*value)?))))
      .filter_map(|(coord, value)| Some((coord, NotNan::new(value).ok()?)))
      .collect_vec();
    let status = if outcome.converged { "converged" } else { "hit the iteration cap" };
    let mut text = format!(
      "{}x{} grid, {} obstacles, {} iterations, {}",
      outcome.size,
      outcome.size,
      outcome.obstacles.len(),
      outcome.iterations,
      status
    );
    let mean = cells.iter().map(|(_, value)| value.into_inner()).collect::<Mean>();
    if let (Some((min_at, min)), Some((max_at, max))) =
      (cells.iter().min_by_key(|(_, v)| *v), cells.iter().max_by_key(|(_, v)| *v))
    {
      text += &format!(
        "\nmean {:.2}, min {:.2} at {}, max {:.2} at {}",
        mean.mean(),
        min.into_inner(),
        min_at,
        max.into_inner(),
        max_at
      );
    }
    text
  }
}
