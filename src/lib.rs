//! Iterative policy evaluation for a deterministic grid world.
//!
//! A random policy is drawn for an n×n grid with impassable cells, then its
//! discounted return is estimated at every free cell with synchronous
//! Bellman backups until the largest change drops below a threshold or an
//! iteration cap is hit.

pub mod basics;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod grid;
pub mod pipeline;
pub mod policy;
pub mod printer;

pub use basics::{Action, Coord, Directive};
pub use config::{Config, EvalConfig};
pub use error::{Error, Result};
pub use evaluator::{evaluate_policy, evaluate_with, Evaluation, ValueTable};
pub use grid::{Grid, ObstacleSet};
pub use pipeline::{evaluate_batch, generate_value_policy_matrices, RunOutcome, RunRequest};
pub use policy::{generate_policy, Policy};
